use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Record category. Each domain has its own canonical schema and its own
/// pair of base/custom datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Spells,
    Monsters,
    MagicItems,
}

impl Domain {
    /// All domains, in pipeline order.
    pub const ALL: [Domain; 3] = [Domain::Spells, Domain::Monsters, Domain::MagicItems];

    /// Domain name as used in artifact flags and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Spells => "spells",
            Domain::Monsters => "monsters",
            Domain::MagicItems => "magic-items",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Spells => "Spells",
            Domain::Monsters => "Monsters",
            Domain::MagicItems => "Magic Items",
        }
    }

    /// Prefix for synthesized identifiers.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Domain::Spells => "sp",
            Domain::Monsters => "mo",
            Domain::MagicItems => "mi",
        }
    }

    /// Singular record tag (the spell `type` default uses this).
    pub fn record_tag(&self) -> &'static str {
        match self {
            Domain::Spells => "spell",
            Domain::Monsters => "monster",
            Domain::MagicItems => "magic-item",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = CatalogError;

    /// Accepts the canonical names plus the singular tags and underscore spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "spells" | "spell" => Ok(Domain::Spells),
            "monsters" | "monster" => Ok(Domain::Monsters),
            "magic-items" | "magic-item" => Ok(Domain::MagicItems),
            "" => Err(CatalogError::InvalidArgument {
                message: "domain is required".to_string(),
            }),
            _ => Err(CatalogError::InvalidArgument {
                message: format!("unknown domain '{}'", s.trim()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_tags() {
        assert_eq!("spells".parse::<Domain>().unwrap(), Domain::Spells);
        assert_eq!("Monster".parse::<Domain>().unwrap(), Domain::Monsters);
        assert_eq!("magic_items".parse::<Domain>().unwrap(), Domain::MagicItems);
    }

    #[test]
    fn empty_domain_is_invalid_argument() {
        let err = "  ".parse::<Domain>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument { .. }));
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&Domain::MagicItems).unwrap();
        assert_eq!(json, "\"magic-items\"");
        assert_eq!(Domain::MagicItems.to_string(), "magic-items");
    }
}
