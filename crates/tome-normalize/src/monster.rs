//! Monster normalizer.
//!
//! Strict: the first record with a missing or mistyped required field fails
//! the whole dataset. Optional collections are copied only when non-empty.

use serde_json::{Map, Number, Value};
use tracing::trace;

use tome_model::{CatalogError, Domain, FieldError, Monster, RecordLocation, Result, type_name};

use crate::abilities::resolve_abilities;
use crate::coerce::{
    ensure_number, ensure_sources, ensure_string, non_empty_array, non_empty_object, require_text,
};
use crate::identity::placeholder_id;

const DOMAIN: Domain = Domain::Monsters;

/// Normalize a raw monster dataset. Output order matches input order.
pub fn normalize_monsters(raw: &Value) -> Result<Vec<Monster>> {
    let Some(records) = raw.as_array() else {
        return Err(CatalogError::InvalidArgument {
            message: format!(
                "monsters dataset must be an array, found {}",
                type_name(raw)
            ),
        });
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_monster(record, index))
        .collect()
}

pub fn normalize_monster(raw: &Value, index: usize) -> Result<Monster> {
    let Some(record) = raw.as_object() else {
        return Err(FieldError::mismatch("record", "an object", type_name(raw))
            .at(DOMAIN, RecordLocation::new(index, None)));
    };
    let location = RecordLocation::new(index, record.get("name").and_then(Value::as_str));
    build(record, index).map_err(|error| error.at(DOMAIN, location))
}

fn build(record: &Map<String, Value>, index: usize) -> std::result::Result<Monster, FieldError> {
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .map_or_else(|| placeholder_id(DOMAIN, index), str::to_string);

    let sources = ensure_sources(record.get("sources"), "sources")?;
    let name = require_text(record.get("name"), "name")?;
    let creature_type = require_text(record.get("creature_type"), "creature_type")?;
    let size = require_text(record.get("size"), "size")?;
    let alignment = require_text(record.get("alignment"), "alignment")?;

    let ac = ensure_number(record.get("ac"), "ac")?;
    let armor_type = armor_type(record.get("armor_type"))?;
    let hp = ensure_number(record.get("hp"), "hp")?;
    let hit_dice = require_text(record.get("hit_dice"), "hit_dice")?;
    let speed = speed(record.get("speed"))?;

    let (shape, stats) = resolve_abilities(record)?;
    trace!(index, shape = shape.as_str(), "resolved ability scores");

    let cr = ensure_number(record.get("cr"), "cr")?;
    let xp = xp(record.get("xp"))?;

    Ok(Monster {
        id,
        sources,
        last_updated: ensure_string(record.get("last_updated"), "last_updated", false)?,
        name,
        creature_type,
        subtype: ensure_string(record.get("subtype"), "subtype", false)?,
        size,
        alignment,
        ac,
        armor_type,
        hp,
        hit_dice,
        speed,
        stats,
        saving_throws: non_empty_object(record.get("saving_throws")),
        skills: non_empty_object(record.get("skills")),
        damage_vulnerabilities: non_empty_array(record.get("damage_vulnerabilities")),
        damage_resistances: non_empty_array(record.get("damage_resistances")),
        damage_immunities: non_empty_array(record.get("damage_immunities")),
        condition_immunities: non_empty_array(record.get("condition_immunities")),
        senses: non_empty_object(record.get("senses")),
        languages: non_empty_array(record.get("languages")),
        cr,
        xp,
        traits: non_empty_array(record.get("traits")),
        actions: non_empty_array(record.get("actions")),
        legendary_actions: non_empty_array(record.get("legendary_actions")),
        reactions: non_empty_array(record.get("reactions")),
        lair_actions: non_empty_array(record.get("lair_actions")),
        regional_effects: non_empty_array(record.get("regional_effects")),
    })
}

/// Always present in the output; blank when unnamed.
fn armor_type(value: Option<&Value>) -> std::result::Result<String, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(FieldError::mismatch(
            "armor_type",
            "a string",
            type_name(other),
        )),
    }
}

fn speed(value: Option<&Value>) -> std::result::Result<Map<String, Value>, FieldError> {
    match value {
        None | Some(Value::Null) => Err(FieldError::missing("speed")),
        Some(Value::Object(modes)) if modes.is_empty() => Err(FieldError::missing("speed")),
        Some(Value::Object(modes)) => Ok(modes.clone()),
        Some(other) => Err(FieldError::mismatch("speed", "an object", type_name(other))),
    }
}

/// `""` and `null` mean "not recorded".
fn xp(value: Option<&Value>) -> std::result::Result<Option<Number>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.is_empty() => Ok(None),
        Some(other) => ensure_number(Some(other), "xp").map(Some),
    }
}
