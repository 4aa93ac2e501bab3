use crate::schema::regulation::{ConditionSchema, RegulationSchema};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

static TYPE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("FireDoor", "IfcDoor"),
        ("Wall", "IfcWall"),
        ("Slab", "IfcSlab"),
        ("Roof", "IfcRoof"),
        ("Window", "IfcWindow"),
        ("Stair", "IfcStair"),
        ("Ramp", "IfcRamp"),
        ("Column", "IfcColumn"),
        ("Beam", "IfcBeam"),
        ("Door", "IfcDoor"),
    ])
});

static RELATIONSHIP_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("atLeast", "HIGHER_THAN"),
        ("greaterThan", "HIGHER_THAN"),
        ("moreThan", "HIGHER_THAN"),
        ("lessThan", "LOWER_THAN"),
        ("atMost", "LOWER_THAN"),
        ("smallerThan", "SMALLER_THAN"),
        ("equals", "EQUALS"),
        ("equalTo", "EQUALS"),
    ])
});

/// Rewrite informal element-type and relationship names into their canonical
/// tags and capitalize condition properties.
///
/// Unmapped types and relationships pass through unchanged; this layer never
/// rejects a schema. Idempotent: canonical input comes back as-is.
pub fn normalize_schema(schema: RegulationSchema) -> RegulationSchema {
    let element_type = TYPE_MAP
        .get(schema.element_type.as_str())
        .map(|t| t.to_string())
        .unwrap_or(schema.element_type);

    let conditions = schema
        .conditions
        .into_iter()
        .map(|cond| ConditionSchema {
            property: capitalize(cond.property),
            relationship: RELATIONSHIP_MAP
                .get(cond.relationship.as_str())
                .map(|r| r.to_string())
                .unwrap_or(cond.relationship),
            value: cond.value,
        })
        .collect();

    RegulationSchema {
        element_type,
        conditions,
    }
}

/// Uppercase the first character of a string value, leaving the rest
/// unchanged. Empty strings and non-string values pass through.
fn capitalize(value: Value) -> Value {
    match value {
        Value::String(s) if !s.is_empty() => {
            let mut chars = s.chars();
            let head = chars.next().map(|c| c.to_uppercase().to_string());
            match head {
                Some(head) => Value::String(format!("{}{}", head, chars.as_str())),
                None => Value::String(s),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn condition(property: Value, relationship: &str, value: Value) -> ConditionSchema {
        ConditionSchema {
            property,
            relationship: relationship.to_string(),
            value,
        }
    }

    #[test]
    fn test_type_mapping() {
        let schema = RegulationSchema {
            element_type: "FireDoor".to_string(),
            conditions: vec![],
        };
        assert_eq!(normalize_schema(schema).element_type, "IfcDoor");
    }

    #[test]
    fn test_unmapped_type_passes_through() {
        let schema = RegulationSchema {
            element_type: "IfcFlowSegment".to_string(),
            conditions: vec![],
        };
        assert_eq!(normalize_schema(schema).element_type, "IfcFlowSegment");
    }

    #[test]
    fn test_relationship_mapping() {
        let schema = RegulationSchema {
            element_type: "Door".to_string(),
            conditions: vec![
                condition(json!("rating"), "atLeast", json!("EI 60")),
                condition(json!("width"), "smallerThan", json!(2.0)),
                condition(json!("height"), "foo", json!(1)),
            ],
        };

        let normalized = normalize_schema(schema);
        assert_eq!(normalized.conditions[0].relationship, "HIGHER_THAN");
        assert_eq!(normalized.conditions[1].relationship, "SMALLER_THAN");
        // unrecognized tags survive untouched
        assert_eq!(normalized.conditions[2].relationship, "foo");
    }

    #[test]
    fn test_property_capitalization() {
        let schema = RegulationSchema {
            element_type: "Wall".to_string(),
            conditions: vec![
                condition(json!("rating"), "equals", json!("A")),
                condition(json!(""), "equals", json!("B")),
                condition(Value::Null, "equals", json!("C")),
                condition(json!(7), "equals", json!("D")),
            ],
        };

        let normalized = normalize_schema(schema);
        assert_eq!(normalized.conditions[0].property, json!("Rating"));
        assert_eq!(normalized.conditions[1].property, json!(""));
        assert_eq!(normalized.conditions[2].property, Value::Null);
        assert_eq!(normalized.conditions[3].property, json!(7));
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let schema = RegulationSchema {
            element_type: "IfcDoor".to_string(),
            conditions: vec![condition(json!("Rating"), "EQUALS", json!("EI 60"))],
        };

        let normalized = normalize_schema(schema.clone());
        assert_eq!(normalized, schema);
    }

    #[test]
    fn test_value_is_untouched() {
        let schema = RegulationSchema {
            element_type: "Slab".to_string(),
            conditions: vec![condition(json!("thickness"), "atMost", json!(0.3))],
        };

        let normalized = normalize_schema(schema);
        assert_eq!(normalized.element_type, "IfcSlab");
        assert_eq!(normalized.conditions[0].relationship, "LOWER_THAN");
        assert_eq!(normalized.conditions[0].value, json!(0.3));
    }
}
