//! Magic item normalizer.

use serde_json::{Map, Value};

use tome_model::{CatalogError, Domain, FieldError, MagicItem, RecordLocation, Result, type_name};

use crate::coerce::{
    ensure_array, ensure_boolean, ensure_sources, ensure_string, ensure_string_array,
    required_string,
};
use crate::identity::content_id;

const DOMAIN: Domain = Domain::MagicItems;

/// Normalize a raw magic item dataset. Output order matches input order.
pub fn normalize_magic_items(raw: &Value) -> Result<Vec<MagicItem>> {
    let Some(records) = raw.as_array() else {
        return Err(CatalogError::InvalidArgument {
            message: format!(
                "magic-items dataset must be an array, found {}",
                type_name(raw)
            ),
        });
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_magic_item(record, index))
        .collect()
}

pub fn normalize_magic_item(raw: &Value, index: usize) -> Result<MagicItem> {
    let Some(record) = raw.as_object() else {
        return Err(FieldError::mismatch("record", "an object", type_name(raw))
            .at(DOMAIN, RecordLocation::new(index, None)));
    };
    let location = RecordLocation::new(index, record.get("name").and_then(Value::as_str));
    build(record).map_err(|error| error.at(DOMAIN, location))
}

/// First of `keys` that is present and not null.
fn first_present<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn build(record: &Map<String, Value>) -> std::result::Result<MagicItem, FieldError> {
    let name = required_string(record.get("name"), "name")?;
    let sources = ensure_sources(record.get("sources"), "sources")?;
    let id = ensure_string(record.get("id"), "id", false)?
        .unwrap_or_else(|| {
            let source = sources.first().map(|citation| citation.source.as_str());
            content_id(DOMAIN, &name, source)
        });

    let magic_item_category =
        required_string(record.get("magic_item_category"), "magic_item_category")?;
    let rarity = required_string(record.get("rarity"), "rarity")?;

    let item_desc =
        ensure_string_array(first_present(record, &["item_desc", "desc"]), "item_desc")?;
    if item_desc.is_empty() {
        return Err(FieldError::missing("item_desc"));
    }

    let attunement_restrictions = ensure_array(
        record.get("attunement_restrictions"),
        "attunement_restrictions",
    )?;
    let properties = ensure_array(record.get("properties"), "properties")?;

    Ok(MagicItem {
        id,
        name,
        sources,
        magic_item_category,
        rarity,
        item_desc,
        magic_item_type: ensure_string(
            first_present(record, &["magic_item_type", "item_type"]),
            "magic_item_type",
            false,
        )?,
        attunement: ensure_boolean(record.get("attunement"), false),
        attunement_restrictions: Some(attunement_restrictions).filter(|v| !v.is_empty()),
        properties: Some(properties).filter(|v| !v.is_empty()),
        bonus: ensure_string(record.get("bonus"), "bonus", false)?,
        last_updated: ensure_string(record.get("last_updated"), "last_updated", false)?,
    })
}
