/// Build the instructional prompt for one regulation rule.
///
/// Names the exact target JSON shape, enumerates the four permitted
/// relationship tags, lists example standardized element tags, and forbids
/// markdown wrapping so the response parses as bare JSON.
pub fn build_regulation_prompt(natural_text: &str) -> String {
    format!(
        "You are a structured data converter for building fire safety regulations.\n\
         \n\
         Convert the following natural language rule into a valid JSON object with this structure:\n\
         \n\
         {{\n\
         \x20 \"type\": \"IfcType\",\n\
         \x20 \"conditions\": [\n\
         \x20   {{\n\
         \x20     \"property\": \"PropertyName\",\n\
         \x20     \"relationship\": \"RELATIONSHIP_TYPE\",\n\
         \x20     \"value\": \"SomeValue\"\n\
         \x20   }}\n\
         \x20 ]\n\
         }}\n\
         \n\
         Only use these exact relationship types: EQUALS, HIGHER_THAN, LOWER_THAN, SMALLER_THAN.\n\
         Only use standardized building elements like IfcDoor, IfcWall, IfcSlab, IfcWindow, IfcStair, etc.\n\
         Do not wrap your response in markdown or code blocks.\n\
         \n\
         Text: \"{}\"",
        natural_text
    )
}
