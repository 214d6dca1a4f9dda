//! Reports over normalized datasets: record-count snapshots and the
//! breaking-changes (field shape) diff.

pub mod datasets;
pub mod diff;
pub mod snapshot;

pub use datasets::{DatasetSlot, dataset_slots};
pub use diff::{
    FieldDiff, REPORT_FILE, TypeChange, build_report, diff_records, render_markdown,
    summarize_fields, write_report,
};
pub use snapshot::{DatasetCount, SNAPSHOT_FILE, Snapshot, take_snapshot, write_snapshot};

/// Timestamp for report headers.
pub fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
