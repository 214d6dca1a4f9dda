use serde_json::Value;

use crate::magic_item::MagicItem;
use crate::monster::Monster;
use crate::spell::Spell;

/// Identity access used by the aggregator and the dataset store.
pub trait CatalogRecord {
    /// Stable identity, or `None` when the record has no usable id.
    fn id(&self) -> Option<&str>;

    /// Display name, used in diagnostics.
    fn name(&self) -> Option<&str> {
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl CatalogRecord for Value {
    fn id(&self) -> Option<&str> {
        non_empty(self.get("id").and_then(Value::as_str))
    }

    fn name(&self) -> Option<&str> {
        non_empty(self.get("name").and_then(Value::as_str))
    }
}

impl CatalogRecord for Spell {
    fn id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }
}

impl CatalogRecord for Monster {
    fn id(&self) -> Option<&str> {
        non_empty(Some(&self.id))
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl CatalogRecord for MagicItem {
    fn id(&self) -> Option<&str> {
        non_empty(Some(&self.id))
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
