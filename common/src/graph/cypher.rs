use crate::schema::RegulationSchema;
use serde_json::Value;

/// Translate a normalized regulation schema into an ordered sequence of
/// Cypher statements: one MERGE for the regulation node keyed by element
/// type, then one statement per condition attaching it to the regulation.
pub fn transform_to_cypher(schema: &RegulationSchema) -> Vec<String> {
    let element_type = cypher_literal(&Value::String(schema.element_type.clone()));

    let mut statements = vec![format!(
        "MERGE (r:Regulation {{type: {}}})",
        element_type
    )];

    for condition in &schema.conditions {
        statements.push(format!(
            "MATCH (r:Regulation {{type: {}}})\n\
             MERGE (c:Condition {{property: {}, relationship: {}, value: {}}})\n\
             MERGE (r)-[:HAS_CONDITION]->(c)",
            element_type,
            cypher_literal(&condition.property),
            cypher_literal(&Value::String(condition.relationship.clone())),
            cypher_literal(&condition.value),
        ));
    }

    statements
}

/// Render a JSON value as a Cypher literal. Strings are single-quoted with
/// backslash and quote escaping; numbers and booleans pass through as-is.
fn cypher_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => format!("'{}'", other.to_string().replace('\\', "\\\\").replace('\'', "\\'")),
    }
}
