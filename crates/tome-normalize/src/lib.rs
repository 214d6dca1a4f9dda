//! Normalization of legacy catalog records into the canonical schemas.
//!
//! Each domain has one normalizer. All of them are pure: they read a raw
//! dataset (a JSON array of loosely-typed objects) and return canonical
//! records in input order, or the first error encountered.
//!
//! # Example
//!
//! ```ignore
//! use tome_model::Domain;
//! use tome_normalize::normalize;
//!
//! let raw = serde_json::json!([{ "name": "Light", "desc": ["..."] }]);
//! let spells = normalize(Domain::Spells, &raw)?;
//! assert_eq!(spells.len(), 1);
//! ```

pub mod abilities;
pub mod coerce;
pub mod identity;
pub mod magic_item;
pub mod monster;
pub mod spell;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use tome_model::{CatalogRecord, Domain, MagicItem, Monster, Result, Spell};

pub use abilities::{AbilityShape, resolve_abilities};
pub use identity::{content_id, placeholder_id};
pub use magic_item::{normalize_magic_item, normalize_magic_items};
pub use monster::{normalize_monster, normalize_monsters};
pub use spell::{normalize_spell, normalize_spells};

/// Canonical records of one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedDataset {
    Spells(Vec<Spell>),
    Monsters(Vec<Monster>),
    MagicItems(Vec<MagicItem>),
}

impl NormalizedDataset {
    pub fn domain(&self) -> Domain {
        match self {
            Self::Spells(_) => Domain::Spells,
            Self::Monsters(_) => Domain::Monsters,
            Self::MagicItems(_) => Domain::MagicItems,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Spells(records) => records.len(),
            Self::Monsters(records) => records.len(),
            Self::MagicItems(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record ids in order; `None` for records without one.
    pub fn ids(&self) -> Vec<Option<&str>> {
        match self {
            Self::Spells(records) => records.iter().map(CatalogRecord::id).collect(),
            Self::Monsters(records) => records.iter().map(CatalogRecord::id).collect(),
            Self::MagicItems(records) => records.iter().map(CatalogRecord::id).collect(),
        }
    }

    /// Records as JSON values, ready for aggregation or validation.
    pub fn to_values(&self) -> serde_json::Result<Vec<Value>> {
        match serde_json::to_value(self)? {
            Value::Array(values) => Ok(values),
            other => Ok(vec![other]),
        }
    }
}

/// Normalize a raw dataset with the normalizer of `domain`.
pub fn normalize(domain: Domain, raw: &Value) -> Result<NormalizedDataset> {
    let dataset = match domain {
        Domain::Spells => NormalizedDataset::Spells(normalize_spells(raw)?),
        Domain::Monsters => NormalizedDataset::Monsters(normalize_monsters(raw)?),
        Domain::MagicItems => NormalizedDataset::MagicItems(normalize_magic_items(raw)?),
    };
    debug!(domain = %domain, records = dataset.len(), "normalized dataset");
    Ok(dataset)
}
