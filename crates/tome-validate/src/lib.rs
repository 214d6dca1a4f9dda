//! Schema validation of canonical catalog records.
//!
//! Unlike normalization, validation never stops at the first problem: every
//! record is checked and all findings are collected into a
//! [`ValidationReport`].

pub mod checks;
pub mod issue;
pub mod report;
pub mod rules;

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info_span};

use tome_model::Domain;

pub use issue::{Category, Issue, Severity};
pub use report::{Finding, ValidationReport, render_log};
pub use rules::{DomainSchema, FieldKind, FieldRule, schema_for};

/// Validate a domain's canonical records against its schema.
pub fn validate_records(domain: Domain, records: &[Value]) -> ValidationReport {
    let span = info_span!("validate", domain = %domain);
    let _guard = span.enter();
    let start = Instant::now();

    let report = checks::run_all(&schema_for(domain), records);
    debug!(
        domain = %domain,
        records = records.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    report
}
