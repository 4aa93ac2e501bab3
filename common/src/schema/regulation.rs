use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four relationship tags valid downstream of normalization.
pub const RELATIONSHIP_TAGS: [&str; 4] =
    ["EQUALS", "HIGHER_THAN", "LOWER_THAN", "SMALLER_THAN"];

/// A single constraint within a regulation: (property, relationship, value).
///
/// `property` and `value` are kept as raw JSON values because the model may
/// return nulls or numbers where strings are expected, and normalization
/// passes those through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSchema {
    #[serde(default)]
    pub property: Value,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub value: Value,
}

/// Structured representation of a natural-language building-code rule:
/// a target element type plus an ordered list of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationSchema {
    #[serde(rename = "type", default)]
    pub element_type: String,
    #[serde(default)]
    pub conditions: Vec<ConditionSchema>,
}

impl RegulationSchema {
    pub fn is_canonical_relationship(tag: &str) -> bool {
        RELATIONSHIP_TAGS.contains(&tag)
    }
}
