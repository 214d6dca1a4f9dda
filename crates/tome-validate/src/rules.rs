//! Per-domain field rule tables.
//!
//! Each canonical schema is a list of [`FieldRule`]s: a field name, the
//! semantic type its value must have, and whether it must be present.

use serde_json::Value;

use tome_model::{ABILITY_KEYS, Domain};

/// Semantic type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    NonEmptyString,
    String,
    Number,
    Boolean,
    Array,
    NonEmptyArray,
    StringArray,
    Object,
    NonEmptyObject,
    /// Mapping with the six numeric ability scores.
    AbilityScores,
    /// Non-empty array of `{source, page}` citations.
    Sources,
}

impl FieldKind {
    /// Phrase used in messages ("must be {expected}").
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::NonEmptyString => "a non-empty string",
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::Boolean => "a boolean",
            FieldKind::Array => "an array",
            FieldKind::NonEmptyArray => "a non-empty array",
            FieldKind::StringArray => "an array of strings",
            FieldKind::Object => "an object",
            FieldKind::NonEmptyObject => "a non-empty object",
            FieldKind::AbilityScores => "an object with six numeric ability scores",
            FieldKind::Sources => "a non-empty array of source citations",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::NonEmptyString => value.as_str().is_some_and(|s| !s.trim().is_empty()),
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::NonEmptyArray => value.as_array().is_some_and(|items| !items.is_empty()),
            FieldKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::Object => value.is_object(),
            FieldKind::NonEmptyObject => value.as_object().is_some_and(|map| !map.is_empty()),
            FieldKind::AbilityScores => value.as_object().is_some_and(|map| {
                ABILITY_KEYS
                    .iter()
                    .all(|key| map.get(*key).is_some_and(Value::is_number))
            }),
            FieldKind::Sources => value
                .as_array()
                .is_some_and(|items| !items.is_empty() && items.iter().all(is_citation)),
        }
    }
}

fn is_citation(value: &Value) -> bool {
    let Some(citation) = value.as_object() else {
        return false;
    };
    let source_ok = citation
        .get("source")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    let page_ok = matches!(
        citation.get("page"),
        None | Some(Value::Null | Value::String(_))
    );
    source_ok && page_ok
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(field: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        field,
        kind,
        required: true,
    }
}

const fn optional(field: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        field,
        kind,
        required: false,
    }
}

/// Schema of one domain.
#[derive(Debug, Clone, Copy)]
pub struct DomainSchema {
    pub domain: Domain,
    pub rules: &'static [FieldRule],
    /// Whether fields outside `rules` are allowed.
    pub open: bool,
}

impl DomainSchema {
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }
}

const SPELL_RULES: &[FieldRule] = &[
    required("id", FieldKind::NonEmptyString),
    required("name", FieldKind::NonEmptyString),
    required("type", FieldKind::String),
    required("spell_desc", FieldKind::StringArray),
    required("higher_level", FieldKind::String),
    required("sources", FieldKind::Array),
    required("classes", FieldKind::StringArray),
    required("components", FieldKind::StringArray),
    required("material", FieldKind::String),
    required("ritual", FieldKind::Boolean),
    required("concentration", FieldKind::Boolean),
];

const MONSTER_RULES: &[FieldRule] = &[
    required("id", FieldKind::NonEmptyString),
    required("sources", FieldKind::Sources),
    optional("last_updated", FieldKind::NonEmptyString),
    required("name", FieldKind::NonEmptyString),
    required("creature_type", FieldKind::NonEmptyString),
    optional("subtype", FieldKind::NonEmptyString),
    required("size", FieldKind::NonEmptyString),
    required("alignment", FieldKind::NonEmptyString),
    required("ac", FieldKind::Number),
    required("armor_type", FieldKind::String),
    required("hp", FieldKind::Number),
    required("hit_dice", FieldKind::NonEmptyString),
    required("speed", FieldKind::NonEmptyObject),
    required("stats", FieldKind::AbilityScores),
    optional("saving_throws", FieldKind::NonEmptyObject),
    optional("skills", FieldKind::NonEmptyObject),
    optional("damage_vulnerabilities", FieldKind::NonEmptyArray),
    optional("damage_resistances", FieldKind::NonEmptyArray),
    optional("damage_immunities", FieldKind::NonEmptyArray),
    optional("condition_immunities", FieldKind::NonEmptyArray),
    optional("senses", FieldKind::NonEmptyObject),
    optional("languages", FieldKind::NonEmptyArray),
    required("cr", FieldKind::Number),
    optional("xp", FieldKind::Number),
    optional("traits", FieldKind::NonEmptyArray),
    optional("actions", FieldKind::NonEmptyArray),
    optional("legendary_actions", FieldKind::NonEmptyArray),
    optional("reactions", FieldKind::NonEmptyArray),
    optional("lair_actions", FieldKind::NonEmptyArray),
    optional("regional_effects", FieldKind::NonEmptyArray),
];

const MAGIC_ITEM_RULES: &[FieldRule] = &[
    required("id", FieldKind::NonEmptyString),
    required("name", FieldKind::NonEmptyString),
    required("sources", FieldKind::Sources),
    required("magic_item_category", FieldKind::NonEmptyString),
    required("rarity", FieldKind::NonEmptyString),
    required("item_desc", FieldKind::NonEmptyArray),
    optional("magic_item_type", FieldKind::NonEmptyString),
    optional("attunement", FieldKind::Boolean),
    optional("attunement_restrictions", FieldKind::NonEmptyArray),
    optional("properties", FieldKind::NonEmptyArray),
    optional("bonus", FieldKind::NonEmptyString),
    optional("last_updated", FieldKind::NonEmptyString),
];

/// Rule table for `domain`.
pub fn schema_for(domain: Domain) -> DomainSchema {
    match domain {
        Domain::Spells => DomainSchema {
            domain,
            rules: SPELL_RULES,
            open: true,
        },
        Domain::Monsters => DomainSchema {
            domain,
            rules: MONSTER_RULES,
            open: false,
        },
        Domain::MagicItems => DomainSchema {
            domain,
            rules: MAGIC_ITEM_RULES,
            open: false,
        },
    }
}
