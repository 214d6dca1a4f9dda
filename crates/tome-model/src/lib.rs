//! Canonical record types for the tome catalog.
//!
//! Every domain (spells, monsters, magic items) has one canonical schema.
//! Normalizers in `tome-normalize` produce these types; the aggregator and
//! the dataset store in `tome-core` consume them through [`CatalogRecord`].

pub mod domain;
pub mod error;
pub mod magic_item;
pub mod monster;
pub mod record;
pub mod source;
pub mod spell;
pub mod value;

pub use domain::Domain;
pub use error::{CatalogError, ErrorKind, FieldError, RecordLocation, Result};
pub use magic_item::MagicItem;
pub use monster::{ABILITY_KEYS, AbilityScores, Monster};
pub use record::CatalogRecord;
pub use source::SourceRef;
pub use spell::Spell;
pub use value::type_name;
