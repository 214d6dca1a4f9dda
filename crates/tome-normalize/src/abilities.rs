//! Ability score extraction for monster records.
//!
//! Legacy datasets store the six scores in one of three layouts. The shapes
//! are tried in [`AbilityShape::ORDER`]; the first one that yields six
//! numeric scores wins.

use serde_json::{Map, Value};
use tracing::debug;

use tome_model::{AbilityScores, FieldError};

/// Where a record keeps its ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityShape {
    /// Canonical `stats` mapping.
    Stats,
    /// Legacy `abilities` mapping.
    Abilities,
    /// Six top-level scalar fields (`str`, `dex`, ...).
    TopLevel,
}

impl AbilityShape {
    /// Extraction order.
    pub const ORDER: [AbilityShape; 3] = [
        AbilityShape::Stats,
        AbilityShape::Abilities,
        AbilityShape::TopLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityShape::Stats => "stats",
            AbilityShape::Abilities => "abilities",
            AbilityShape::TopLevel => "top-level",
        }
    }

    /// Scores in this shape, or `None` when the shape is absent or incomplete.
    pub fn extract(&self, record: &Map<String, Value>) -> Option<AbilityScores> {
        match self {
            AbilityShape::Stats => nested(record, "stats"),
            AbilityShape::Abilities => nested(record, "abilities"),
            AbilityShape::TopLevel => scores_from(record),
        }
    }
}

fn nested(record: &Map<String, Value>, key: &str) -> Option<AbilityScores> {
    let map = record.get(key)?.as_object()?;
    let scores = scores_from(map);
    if scores.is_none() {
        debug!(shape = key, "ability mapping present but incomplete");
    }
    scores
}

fn scores_from(map: &Map<String, Value>) -> Option<AbilityScores> {
    let score = |key: &str| map.get(key).and_then(Value::as_number).cloned();
    Some(AbilityScores {
        str: score("str")?,
        dex: score("dex")?,
        con: score("con")?,
        int: score("int")?,
        wis: score("wis")?,
        cha: score("cha")?,
    })
}

/// Resolve the ability scores of a monster record.
pub fn resolve_abilities(
    record: &Map<String, Value>,
) -> Result<(AbilityShape, AbilityScores), FieldError> {
    AbilityShape::ORDER
        .iter()
        .find_map(|shape| shape.extract(record).map(|scores| (*shape, scores)))
        .ok_or_else(|| FieldError::missing("stats"))
}
