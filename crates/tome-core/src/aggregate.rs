//! Merge of a domain's base and custom datasets by identity.
//!
//! Output order is the order in which each id was first seen: base records
//! in input order, then custom records that introduce new ids. A custom
//! record with an existing id replaces the base record in place.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use tome_model::{CatalogError, CatalogRecord, Domain, Result, type_name};

/// Merge typed records. Records for ids present in both inputs are the
/// custom records, moved into the output unchanged.
pub fn aggregate<R: CatalogRecord>(domain: Domain, base: Vec<R>, custom: Vec<R>) -> Result<Vec<R>> {
    merge(domain.as_str(), base, custom)
}

/// Merge raw JSON datasets.
///
/// Fails with `InvalidArgument` when `domain` is blank or either input is not
/// an array, and with `SchemaViolation` when a record has no id.
pub fn aggregate_values(domain: &str, base: Value, custom: Value) -> Result<Vec<Value>> {
    if domain.trim().is_empty() {
        return Err(CatalogError::InvalidArgument {
            message: "aggregate: domain is required".to_string(),
        });
    }
    let base = into_records(domain, "base", base)?;
    let custom = into_records(domain, "custom", custom)?;
    merge(domain, base, custom)
}

fn into_records(domain: &str, slice: &str, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::InvalidArgument {
            message: format!(
                "aggregate({domain}): {slice} input must be an array, found {}",
                type_name(&other)
            ),
        }),
    }
}

fn merge<R: CatalogRecord>(domain: &str, base: Vec<R>, custom: Vec<R>) -> Result<Vec<R>> {
    let base_len = base.len();
    let custom_len = custom.len();
    let mut merged: Vec<R> = Vec::with_capacity(base_len + custom_len);
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(base_len + custom_len);
    let mut overrides = 0usize;

    let slices = [("base", base), ("custom", custom)];
    for (slice, records) in slices {
        for (index, record) in records.into_iter().enumerate() {
            let Some(id) = record.id().map(str::to_string) else {
                return Err(CatalogError::SchemaViolation {
                    domain: domain.to_string(),
                    message: format!("{slice} record #{index} is missing an id"),
                });
            };
            match positions.get(&id) {
                Some(&position) => {
                    merged[position] = record;
                    overrides += 1;
                }
                None => {
                    positions.insert(id, merged.len());
                    merged.push(record);
                }
            }
        }
    }

    debug!(
        domain,
        base = base_len,
        custom = custom_len,
        merged = merged.len(),
        overrides,
        "aggregated domain"
    );
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tome_model::ErrorKind;

    #[test]
    fn custom_replaces_base_in_place() {
        let merged = aggregate_values(
            "spells",
            json!([{"id": "sp-1", "name": "Fireball"}]),
            json!([{"id": "sp-1", "name": "Fireball (Homebrew)"}]),
        )
        .unwrap();
        assert_eq!(merged, vec![json!({"id": "sp-1", "name": "Fireball (Homebrew)"})]);
    }

    #[test]
    fn new_custom_ids_are_appended() {
        let merged = aggregate_values(
            "spells",
            json!([{"id": "sp-1"}, {"id": "sp-2"}]),
            json!([{"id": "sp-3"}]),
        )
        .unwrap();
        let ids: Vec<_> = merged.iter().filter_map(CatalogRecord::id).collect();
        assert_eq!(ids, ["sp-1", "sp-2", "sp-3"]);
    }

    #[test]
    fn override_keeps_first_seen_position() {
        let merged = aggregate_values(
            "monsters",
            json!([{"id": "a"}, {"id": "b"}, {"id": "c"}]),
            json!([{"id": "d"}, {"id": "a", "name": "custom"}]),
        )
        .unwrap();
        let ids: Vec<_> = merged.iter().filter_map(CatalogRecord::id).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(merged[0]["name"], json!("custom"));
    }

    #[test]
    fn duplicate_base_ids_collapse_to_last() {
        let merged =
            aggregate_values("spells", json!([{"id": "x", "v": 1}, {"id": "x", "v": 2}]), json!([]))
                .unwrap();
        assert_eq!(merged, vec![json!({"id": "x", "v": 2})]);
    }

    #[test]
    fn missing_id_is_schema_violation() {
        let err = aggregate_values("spells", json!([{"name": "Light"}]), json!([])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
        assert!(err.to_string().contains("base record #0"));

        let err = aggregate_values("spells", json!([]), json!([{"id": ""}])).unwrap_err();
        assert!(err.to_string().contains("custom record #0"));
    }

    #[test]
    fn blank_domain_is_invalid_argument() {
        let err = aggregate_values(" ", json!([]), json!([])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn non_array_input_is_invalid_argument() {
        let err = aggregate_values("spells", json!([]), json!({"id": "sp-1"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("custom input"));
    }
}
