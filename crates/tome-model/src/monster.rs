use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::source::SourceRef;

/// Ability score keys in canonical order.
pub const ABILITY_KEYS: [&str; 6] = ["str", "dex", "con", "int", "wis", "cha"];

/// The six ability scores. Numbers keep their source representation so a
/// second normalization pass is byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: Number,
    pub dex: Number,
    pub con: Number,
    pub int: Number,
    pub wis: Number,
    pub cha: Number,
}

impl AbilityScores {
    pub fn get(&self, key: &str) -> Option<&Number> {
        match key {
            "str" => Some(&self.str),
            "dex" => Some(&self.dex),
            "con" => Some(&self.con),
            "int" => Some(&self.int),
            "wis" => Some(&self.wis),
            "cha" => Some(&self.cha),
            _ => None,
        }
    }
}

/// Canonical monster stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: String,
    pub sources: Vec<SourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    pub name: String,
    pub creature_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub size: String,
    pub alignment: String,

    pub ac: Number,
    /// Always present; empty when the armor is unnamed.
    pub armor_type: String,
    pub hp: Number,
    pub hit_dice: String,

    /// Movement mode to distance ("walk" -> "30 ft."). Never empty.
    pub speed: Map<String, Value>,

    pub stats: AbilityScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saving_throws: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_vulnerabilities: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_resistances: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_immunities: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_immunities: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senses: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Value>>,

    pub cr: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendary_actions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lair_actions: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_effects: Option<Vec<Value>>,
}
