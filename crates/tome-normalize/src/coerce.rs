//! Field coercion utilities shared by the domain normalizers.
//!
//! Each helper looks at one raw field and either returns the canonical value
//! or a [`FieldError`] naming that field. Record context is attached by the
//! caller.

use serde_json::{Map, Number, Value};

use tome_model::{FieldError, SourceRef, type_name};

/// `None`/`null` become an empty sequence; a sequence is returned unchanged.
pub fn ensure_array(value: Option<&Value>, field: &str) -> Result<Vec<Value>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(FieldError::mismatch(field, "an array", type_name(other))),
    }
}

/// Stringify a field.
///
/// `None`, `null` and `""` are "not provided": an error when `required`,
/// otherwise `Ok(None)` so callers can tell absence from an empty value.
pub fn ensure_string(
    value: Option<&Value>,
    field: &str,
    required: bool,
) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => absent(field, required),
        Some(Value::String(text)) if text.is_empty() => absent(field, required),
        Some(other) => Ok(Some(stringify(other))),
    }
}

fn absent(field: &str, required: bool) -> Result<Option<String>, FieldError> {
    if required {
        Err(FieldError::missing(field))
    } else {
        Ok(None)
    }
}

/// [`ensure_string`] with `required = true`.
pub fn required_string(value: Option<&Value>, field: &str) -> Result<String, FieldError> {
    ensure_string(value, field, true)?.ok_or_else(|| FieldError::missing(field))
}

/// Strict string check: the value must already be a string with visible content.
pub fn require_text(value: Option<&Value>, field: &str) -> Result<String, FieldError> {
    match value {
        None | Some(Value::Null) => Err(FieldError::missing(field)),
        Some(Value::String(text)) if text.trim().is_empty() => Err(FieldError::missing(field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(FieldError::mismatch(field, "a string", type_name(other))),
    }
}

/// `None`/`null` become `default`; anything else is coerced by truthiness.
pub fn ensure_boolean(value: Option<&Value>, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(other) => is_truthy(other),
    }
}

/// The value must be a number. JSON numbers are always finite.
///
/// Absence is reported as a missing field so "no hp" and "hp is text" stay
/// distinguishable.
pub fn ensure_number(value: Option<&Value>, field: &str) -> Result<Number, FieldError> {
    match value {
        None | Some(Value::Null) => Err(FieldError::missing(field)),
        Some(Value::Number(number)) => Ok(number.clone()),
        Some(other) => Err(FieldError::mismatch(field, "a number", type_name(other))),
    }
}

/// Loose truthiness, matching how the legacy datasets were authored.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as text. Structured values use compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Stringify every element of a sequence.
pub fn string_items(items: &[Value]) -> Vec<String> {
    items.iter().map(stringify).collect()
}

/// A sequence whose elements must all be strings. Elements are never
/// stringified; the first non-string is reported as `field[i]`.
pub fn ensure_string_array(value: Option<&Value>, field: &str) -> Result<Vec<String>, FieldError> {
    ensure_array(value, field)?
        .iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::String(text) => Ok(text.clone()),
            other => Err(FieldError::mismatch(
                format!("{field}[{position}]"),
                "a string",
                type_name(other),
            )),
        })
        .collect()
}

/// A mapping with at least one key, or `None`.
pub fn non_empty_object(value: Option<&Value>) -> Option<Map<String, Value>> {
    value
        .and_then(Value::as_object)
        .filter(|map| !map.is_empty())
        .cloned()
}

/// A sequence with at least one element, or `None`. Non-sequences are dropped.
pub fn non_empty_array(value: Option<&Value>) -> Option<Vec<Value>> {
    value
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .cloned()
}

/// A non-empty list of `{source, page}` citations.
pub fn ensure_sources(value: Option<&Value>, field: &str) -> Result<Vec<SourceRef>, FieldError> {
    let entries = ensure_array(value, field)?;
    if entries.is_empty() {
        return Err(FieldError::missing(field));
    }
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| source_ref(entry, &format!("{field}[{position}]")))
        .collect()
}

fn source_ref(entry: &Value, field: &str) -> Result<SourceRef, FieldError> {
    let Some(object) = entry.as_object() else {
        return Err(FieldError::mismatch(field, "an object", type_name(entry)));
    };
    let source = require_text(object.get("source"), &format!("{field}.source"))?;
    let page = match object.get("page") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => {
            return Err(FieldError::mismatch(
                format!("{field}.page"),
                "a string or null",
                type_name(other),
            ));
        }
    };
    Ok(SourceRef { source, page })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ensure_array_defaults_and_rejects_scalars() {
        assert!(ensure_array(None, "tags").unwrap().is_empty());
        assert!(ensure_array(Some(&Value::Null), "tags").unwrap().is_empty());
        assert_eq!(ensure_array(Some(&json!([1, 2])), "tags").unwrap().len(), 2);
        let err = ensure_array(Some(&json!("x")), "tags").unwrap_err();
        assert_eq!(err, FieldError::mismatch("tags", "an array", "string"));
    }

    #[test]
    fn ensure_string_distinguishes_absent_from_value() {
        assert_eq!(ensure_string(Some(&json!("")), "bonus", false).unwrap(), None);
        assert_eq!(ensure_string(None, "bonus", false).unwrap(), None);
        assert_eq!(
            ensure_string(Some(&json!(2)), "bonus", false).unwrap(),
            Some("2".to_string())
        );
        assert_eq!(
            ensure_string(Some(&Value::Null), "rarity", true).unwrap_err(),
            FieldError::missing("rarity")
        );
    }

    #[test]
    fn require_text_rejects_blank_and_non_strings() {
        assert_eq!(
            require_text(Some(&json!("   ")), "size").unwrap_err(),
            FieldError::missing("size")
        );
        assert!(matches!(
            require_text(Some(&json!(3)), "size").unwrap_err(),
            FieldError::TypeMismatch { .. }
        ));
        assert_eq!(require_text(Some(&json!("Large")), "size").unwrap(), "Large");
    }

    #[test]
    fn ensure_boolean_uses_truthiness() {
        assert!(!ensure_boolean(None, false));
        assert!(ensure_boolean(Some(&Value::Null), true));
        assert!(ensure_boolean(Some(&json!("requires attunement")), false));
        assert!(!ensure_boolean(Some(&json!(0)), true));
        assert!(!ensure_boolean(Some(&json!("")), true));
    }

    #[test]
    fn ensure_number_missing_versus_mismatch() {
        assert_eq!(
            ensure_number(None, "hp").unwrap_err(),
            FieldError::missing("hp")
        );
        assert_eq!(
            ensure_number(Some(&json!("12")), "hp").unwrap_err(),
            FieldError::mismatch("hp", "a number", "string")
        );
        assert_eq!(ensure_number(Some(&json!(0.25)), "cr").unwrap().as_f64(), Some(0.25));
    }

    #[test]
    fn sources_require_non_empty_citations() {
        assert_eq!(
            ensure_sources(Some(&json!([])), "sources").unwrap_err(),
            FieldError::missing("sources")
        );
        assert_eq!(
            ensure_sources(Some(&json!([{"page": "3"}])), "sources").unwrap_err(),
            FieldError::missing("sources[0].source")
        );
        let sources = ensure_sources(Some(&json!([{"source": "SRD", "page": 12}])), "sources")
            .unwrap();
        assert_eq!(sources, vec![SourceRef::new("SRD", Some("12".to_string()))]);
    }

    #[test]
    fn string_array_rejects_non_string_elements() {
        assert_eq!(
            ensure_string_array(Some(&json!(["a", "b"])), "item_desc").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(ensure_string_array(None, "item_desc").unwrap().is_empty());
        assert_eq!(
            ensure_string_array(Some(&json!(["a", 3])), "item_desc").unwrap_err(),
            FieldError::mismatch("item_desc[1]", "a string", "number")
        );
    }

    #[test]
    fn sparse_helpers_drop_empty_collections() {
        assert!(non_empty_array(Some(&json!([]))).is_none());
        assert!(non_empty_array(Some(&json!("fire"))).is_none());
        assert!(non_empty_object(Some(&json!({}))).is_none());
        assert!(non_empty_object(Some(&json!({"Dex": "+3"}))).is_some());
    }
}
