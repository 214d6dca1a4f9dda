//! Record counts of every normalized dataset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use tome_core::ProjectConfig;
use tome_ingest::load_artifact;

use crate::datasets::{DatasetSlot, dataset_slots};

/// Snapshot file name inside the reports directory.
pub const SNAPSHOT_FILE: &str = "dataset-snapshot.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCount {
    pub label: String,
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub counts: Vec<DatasetCount>,
}

impl Snapshot {
    /// `Label: count` lines.
    pub fn render(&self) -> String {
        self.counts
            .iter()
            .map(|count| format!("{}: {}\n", count.label, count.records))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|count| count.records).sum()
    }
}

/// Count the records of all six normalized artifacts.
pub fn take_snapshot(config: &ProjectConfig) -> Result<Snapshot> {
    let counts = dataset_slots(config)
        .into_iter()
        .map(|slot| count_slot(&slot))
        .collect::<Result<Vec<_>>>()?;
    Ok(Snapshot { counts })
}

fn count_slot(slot: &DatasetSlot) -> Result<DatasetCount> {
    let records = load_artifact(&slot.normalized, slot.domain)
        .with_context(|| format!("load {}", slot.label))?;
    Ok(DatasetCount {
        label: slot.label.clone(),
        path: slot.normalized.clone(),
        records: records.len(),
    })
}

/// Write the snapshot into `reports_dir`. Returns the file path.
pub fn write_snapshot(reports_dir: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    fs::create_dir_all(reports_dir)
        .with_context(|| format!("create {}", reports_dir.display()))?;
    let path = reports_dir.join(SNAPSHOT_FILE);
    fs::write(&path, snapshot.render()).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), total = snapshot.total(), "snapshot written");
    Ok(path)
}
