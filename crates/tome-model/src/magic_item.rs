use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::source::SourceRef;

/// Canonical magic item.
///
/// Optional members are sparse: `None` (or `false` for `attunement`) means
/// "not applicable" and the key is omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicItem {
    pub id: String,
    pub name: String,
    pub sources: Vec<SourceRef>,
    pub magic_item_category: String,
    pub rarity: String,
    pub item_desc: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_item_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub attunement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attunement_restrictions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}
