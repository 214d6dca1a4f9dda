//! Id uniqueness across a dataset.

use std::collections::HashMap;

use serde_json::Value;

use tome_model::CatalogRecord;

use crate::issue::Issue;

/// `(index, issue)` for every record reusing an earlier record's id.
pub fn check(records: &[Value]) -> Vec<(usize, Issue)> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(id) = record.id() else {
            continue;
        };
        match first_seen.get(id) {
            Some(&first_index) => issues.push((
                index,
                Issue::DuplicateId {
                    id: id.to_string(),
                    first_index,
                },
            )),
            None => {
                first_seen.insert(id, index);
            }
        }
    }

    issues
}
