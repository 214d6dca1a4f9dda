use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::source::SourceRef;

/// Canonical spell.
///
/// Spells keep every legacy field they arrive with (level, school, range and
/// so on) in `extra`; only the fields below are coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub spell_desc: Vec<String>,
    pub higher_level: String,
    pub sources: Vec<SourceRef>,
    /// Passed through as authored; a non-sequence becomes empty.
    pub classes: Vec<Value>,
    pub components: Vec<Value>,
    pub material: String,
    pub ritual: bool,
    pub concentration: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
