//! Closed-schema checks.

use serde_json::{Map, Value};

use crate::issue::Issue;
use crate::rules::DomainSchema;

/// Flag fields a closed schema does not know.
pub fn check(schema: &DomainSchema, record: &Map<String, Value>) -> Vec<Issue> {
    if schema.open {
        return Vec::new();
    }
    record
        .keys()
        .filter(|key| schema.rule(key).is_none())
        .map(|key| Issue::UnknownField { field: key.clone() })
        .collect()
}
