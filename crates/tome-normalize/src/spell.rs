//! Spell normalizer.
//!
//! Spells are lenient: missing optional fields get defaults and unknown
//! fields are carried through. Only a malformed dataset (or a non-object
//! entry) is rejected.

use serde_json::{Map, Value};

use tome_model::{CatalogError, Domain, Result, SourceRef, Spell, type_name};

use crate::coerce::{ensure_boolean, ensure_string, is_truthy, string_items, stringify};

const UNKNOWN_SOURCE: &str = "Unknown";

/// Fields the normalizer owns; everything else lands in [`Spell::extra`].
/// A legacy `desc` is owned only when truthy.
const OWNED_FIELDS: [&str; 11] = [
    "id",
    "name",
    "type",
    "spell_desc",
    "higher_level",
    "sources",
    "classes",
    "components",
    "material",
    "ritual",
    "concentration",
];

/// Normalize a raw spell dataset. Output order matches input order.
pub fn normalize_spells(raw: &Value) -> Result<Vec<Spell>> {
    let Some(records) = raw.as_array() else {
        return Err(CatalogError::InvalidArgument {
            message: format!("spells dataset must be an array, found {}", type_name(raw)),
        });
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_spell(record, index))
        .collect()
}

pub fn normalize_spell(raw: &Value, index: usize) -> Result<Spell> {
    let Some(object) = raw.as_object() else {
        return Err(CatalogError::InvalidArgument {
            message: format!(
                "spells record #{index} must be an object, found {}",
                type_name(raw)
            ),
        });
    };

    let mut extra = object.clone();
    for field in OWNED_FIELDS {
        extra.remove(field);
    }
    if object.get("desc").is_some_and(is_truthy) {
        extra.remove("desc");
    }

    Ok(Spell {
        // Lenient: a non-string id or name is stringified, never rejected.
        id: ensure_string(object.get("id"), "id", false).unwrap_or_default(),
        name: ensure_string(object.get("name"), "name", false).unwrap_or_default(),
        kind: object
            .get("type")
            .filter(|value| is_truthy(value))
            .map(stringify)
            .unwrap_or_else(|| Domain::Spells.record_tag().to_string()),
        spell_desc: spell_desc(object),
        higher_level: higher_level(object.get("higher_level")),
        sources: spell_sources(object.get("sources")),
        classes: list_or_empty(object.get("classes")),
        components: list_or_empty(object.get("components")),
        material: object
            .get("material")
            .filter(|value| is_truthy(value))
            .map(stringify)
            .unwrap_or_default(),
        ritual: ensure_boolean(object.get("ritual"), false),
        concentration: ensure_boolean(object.get("concentration"), false),
        extra,
    })
}

/// Legacy `desc` wins over an existing `spell_desc`.
fn spell_desc(object: &Map<String, Value>) -> Vec<String> {
    let source = object
        .get("desc")
        .filter(|value| is_truthy(value))
        .or_else(|| object.get("spell_desc"));
    match source {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => string_items(items),
        Some(other) => vec![stringify(other)],
    }
}

fn higher_level(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => string_items(items).join("\n"),
        Some(other) if is_truthy(other) => stringify(other),
        _ => String::new(),
    }
}

fn spell_sources(value: Option<&Value>) -> Vec<SourceRef> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return vec![SourceRef::new(UNKNOWN_SOURCE, Some(String::new()))];
    };
    entries
        .iter()
        .map(|entry| {
            let source = entry
                .get("source")
                .filter(|value| is_truthy(value))
                .map(stringify)
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
            let page = entry
                .get("page")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            SourceRef::new(source, Some(page))
        })
        .collect()
}

/// A sequence is kept element for element; anything else becomes empty.
fn list_or_empty(value: Option<&Value>) -> Vec<Value> {
    value.and_then(Value::as_array).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renames_desc_and_fills_defaults() {
        let spell = normalize_spell(
            &json!({"name": "Ambush Prey", "desc": ["You vanish."], "level": 2}),
            0,
        )
        .unwrap();
        assert_eq!(spell.spell_desc, vec!["You vanish.".to_string()]);
        assert_eq!(spell.kind, "spell");
        assert_eq!(spell.higher_level, "");
        assert_eq!(spell.material, "");
        assert!(spell.classes.is_empty());
        assert!(spell.components.is_empty());
        assert!(!spell.ritual);
        assert_eq!(
            spell.sources,
            vec![SourceRef::new("Unknown", Some(String::new()))]
        );
        assert_eq!(spell.extra.get("level"), Some(&json!(2)));
        assert!(!spell.extra.contains_key("desc"));
    }

    #[test]
    fn null_page_becomes_empty_string() {
        let spell = normalize_spell(
            &json!({"name": "x", "sources": [{"source": "HCS", "page": null}, {}]}),
            0,
        )
        .unwrap();
        assert_eq!(
            spell.sources,
            vec![
                SourceRef::new("HCS", Some(String::new())),
                SourceRef::new("Unknown", Some(String::new())),
            ]
        );
    }

    #[test]
    fn non_sequence_classes_are_replaced() {
        let spell = normalize_spell(&json!({"classes": "Wizard", "components": ["V"]}), 0)
            .unwrap();
        assert!(spell.classes.is_empty());
        assert_eq!(spell.components, vec![json!("V")]);
    }

    #[test]
    fn empty_legacy_description_stays_in_extra() {
        let spell = normalize_spell(&json!({"name": "Mage Hand", "desc": ""}), 0).unwrap();
        assert!(spell.spell_desc.is_empty());
        assert_eq!(spell.extra.get("desc"), Some(&json!("")));
    }

    #[test]
    fn sequence_elements_are_kept_as_authored() {
        let spell = normalize_spell(
            &json!({"classes": [{"name": "Wizard"}], "components": ["V", 1]}),
            0,
        )
        .unwrap();
        assert_eq!(spell.classes, vec![json!({"name": "Wizard"})]);
        assert_eq!(spell.components, vec![json!("V"), json!(1)]);
    }

    #[test]
    fn higher_level_sequence_is_joined() {
        let spell = normalize_spell(&json!({"higher_level": ["a", "b"]}), 0).unwrap();
        assert_eq!(spell.higher_level, "a\nb");
    }

    #[test]
    fn rejects_non_array_dataset() {
        let err = normalize_spells(&json!({"name": "Fireball"})).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument { .. }));
    }

    #[test]
    fn rejects_non_object_entry() {
        let err = normalize_spells(&json!([{"name": "ok"}, "Fireball"])).unwrap_err();
        assert!(err.to_string().contains("#1"));
    }
}
