//! Required field presence.
//!
//! `null` counts as absent.

use serde_json::{Map, Value};

use crate::issue::Issue;
use crate::rules::DomainSchema;

pub fn check(schema: &DomainSchema, record: &Map<String, Value>) -> Vec<Issue> {
    schema
        .rules
        .iter()
        .filter(|rule| rule.required)
        .filter(|rule| record.get(rule.field).is_none_or(Value::is_null))
        .map(|rule| Issue::RequiredMissing {
            field: rule.field.to_string(),
        })
        .collect()
}
