//! Semantic type checks for present fields.

use serde_json::{Map, Value};

use tome_model::type_name;

use crate::issue::Issue;
use crate::rules::DomainSchema;

/// Check every present field against its rule. Absent fields are left to
/// the presence check.
pub fn check(schema: &DomainSchema, record: &Map<String, Value>) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in schema.rules {
        let Some(value) = record.get(rule.field) else {
            continue;
        };
        if rule.required && value.is_null() {
            continue;
        }
        if !rule.kind.matches(value) {
            issues.push(Issue::TypeMismatch {
                field: rule.field.to_string(),
                expected: rule.kind.expected().to_string(),
                found: describe(value).to_string(),
            });
        }
    }

    issues
}

/// Like [`type_name`], but calls out empty values.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::String(s) if s.trim().is_empty() => "an empty string",
        Value::Array(items) if items.is_empty() => "an empty array",
        Value::Object(map) if map.is_empty() => "an empty object",
        other => type_name(other),
    }
}
