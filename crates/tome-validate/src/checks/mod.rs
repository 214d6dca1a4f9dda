//! Validation check modules.
//!
//! Each module performs one kind of check. Every record is checked; a
//! failing record never stops the run.

mod datatype;
mod identity;
mod required;
mod shape;

use serde_json::Value;

use tome_model::{CatalogRecord, type_name};

use crate::issue::Issue;
use crate::report::{Finding, ValidationReport};
use crate::rules::DomainSchema;

/// Run all checks on a dataset.
pub fn run_all(schema: &DomainSchema, records: &[Value]) -> ValidationReport {
    let mut report = ValidationReport::new(schema.domain, records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(fields) = record.as_object() else {
            report.add(finding(
                index,
                record,
                Issue::NotAnObject {
                    found: type_name(record).to_string(),
                },
            ));
            continue;
        };

        // 1. Required field presence
        for issue in required::check(schema, fields) {
            report.add(finding(index, record, issue));
        }

        // 2. Semantic types of present fields
        for issue in datatype::check(schema, fields) {
            report.add(finding(index, record, issue));
        }

        // 3. Unknown fields on closed schemas (warnings)
        for issue in shape::check(schema, fields) {
            report.add(finding(index, record, issue));
        }
    }

    // 4. Duplicate ids
    for (index, issue) in identity::check(records) {
        report.add(finding(index, &records[index], issue));
    }

    report.sort();
    report
}

fn finding(index: usize, record: &Value, issue: Issue) -> Finding {
    Finding {
        index,
        id: record.id().map(str::to_string),
        name: record.name().map(str::to_string),
        severity: issue.default_severity(),
        issue,
    }
}
