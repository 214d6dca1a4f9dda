//! Breaking-changes report: field shapes of the legacy baseline against the
//! normalized output.
//!
//! Only the first record of each dataset is compared. Field types use the
//! JSON type names, with arrays and nulls called out separately.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use tome_core::ProjectConfig;
use tome_ingest::{load_artifact, load_legacy};
use tome_model::type_name;

use crate::datasets::{DatasetSlot, dataset_slots};

/// Report file name inside the reports directory.
pub const REPORT_FILE: &str = "breaking-changes.md";

/// Type summary of one record: `(field, type)` in key order.
pub fn summarize_fields(record: &Value) -> Vec<(String, &'static str)> {
    record
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| (key.clone(), type_name(value)))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeChange {
    pub field: String,
    pub before: &'static str,
    pub after: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    pub label: String,
    /// In normalized key order.
    pub added: Vec<String>,
    /// In baseline key order.
    pub removed: Vec<String>,
    pub changed: Vec<TypeChange>,
}

impl FieldDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare the field shapes of two records.
pub fn diff_records(label: &str, baseline: &Value, current: &Value) -> FieldDiff {
    let before = summarize_fields(baseline);
    let after = summarize_fields(current);
    let lookup = |fields: &[(String, &'static str)], key: &str| {
        fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, kind)| *kind)
    };

    let mut diff = FieldDiff {
        label: label.to_string(),
        ..FieldDiff::default()
    };
    for (field, kind) in &after {
        match lookup(&before, field) {
            None => diff.added.push(field.clone()),
            Some(old) if old != *kind => diff.changed.push(TypeChange {
                field: field.clone(),
                before: old,
                after: *kind,
            }),
            Some(_) => {}
        }
    }
    for (field, _) in &before {
        if lookup(&after, field).is_none() {
            diff.removed.push(field.clone());
        }
    }
    diff
}

fn first_record(records: &[Value], path: &Path, what: &str) -> Result<Value> {
    match records.first() {
        Some(record) => Ok(record.clone()),
        None => bail!("{what} dataset is empty: {}", display_name(path)),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn diff_slot(slot: &DatasetSlot) -> Result<FieldDiff> {
    let baseline = load_legacy(&slot.baseline)
        .with_context(|| format!("baseline for {}", slot.label))?;
    let baseline_records = baseline.records.as_array().map(Vec::as_slice).unwrap_or_default();
    let baseline_first = first_record(baseline_records, &slot.baseline, "baseline")?;

    let current = load_artifact(&slot.normalized, slot.domain)
        .with_context(|| format!("normalized {}", slot.label))?;
    let current_first = first_record(&current, &slot.normalized, "normalized")?;

    let diff = diff_records(&slot.label, &baseline_first, &current_first);
    debug!(
        dataset = %slot.label,
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "dataset diffed"
    );
    Ok(diff)
}

/// Diff all six datasets. Any missing or empty input fails the whole report.
pub fn build_report(config: &ProjectConfig) -> Result<Vec<FieldDiff>> {
    dataset_slots(config).iter().map(diff_slot).collect()
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("**{heading}:**\n"));
    if items.is_empty() {
        out.push_str("- None\n");
    } else {
        for item in items {
            out.push_str(&format!("- {item}\n"));
        }
    }
    out.push('\n');
}

/// Render the Markdown report. `generated_at` goes into the header verbatim.
pub fn render_markdown(diffs: &[FieldDiff], generated_at: &str) -> String {
    let mut out = String::from("# Breaking Changes Report\n\n");
    out.push_str(&format!("> Generated {generated_at}.\n"));
    out.push_str("> Baseline datasets are legacy script globals (`var data = [...]`).\n");
    out.push_str("> Current datasets are normalized artifacts (`\"__normalized\": true`).\n\n");

    for diff in diffs {
        out.push_str(&format!("## {}\n\n", diff.label));
        push_list(&mut out, "Added fields", &diff.added);
        push_list(&mut out, "Removed fields", &diff.removed);
        let changes: Vec<String> = diff
            .changed
            .iter()
            .map(|change| format!("{}: {} → {}", change.field, change.before, change.after))
            .collect();
        push_list(&mut out, "Type changes", &changes);
    }
    out
}

/// Write the report into `reports_dir`. Returns the file path.
pub fn write_report(reports_dir: &Path, markdown: &str) -> Result<PathBuf> {
    fs::create_dir_all(reports_dir)
        .with_context(|| format!("create {}", reports_dir.display()))?;
    let path = reports_dir.join(REPORT_FILE);
    fs::write(&path, markdown).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "breaking-changes report written");
    Ok(path)
}
