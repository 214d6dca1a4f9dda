//! The six normalized datasets a project tracks.

use std::path::PathBuf;

use tome_core::{ProjectConfig, Slice};
use tome_model::Domain;

/// One base or custom dataset of one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSlot {
    /// "Spells SRD", "Monsters Custom", ...
    pub label: String,
    pub domain: Domain,
    pub slice: Slice,
    /// Normalized artifact.
    pub normalized: PathBuf,
    /// Legacy copy the normalized output is compared against.
    pub baseline: PathBuf,
}

/// Base then custom for every domain, in domain order.
pub fn dataset_slots(config: &ProjectConfig) -> Vec<DatasetSlot> {
    let baseline_dir = config.baseline_dir();
    Domain::ALL
        .iter()
        .flat_map(|&domain| {
            let paths = config.domain_paths(domain);
            let baseline_dir = baseline_dir.clone();
            Slice::ALL.into_iter().map(move |slice| {
                let raw = paths.raw(slice);
                let baseline = match raw.file_name() {
                    Some(name) => baseline_dir.join(name),
                    None => baseline_dir.clone(),
                };
                DatasetSlot {
                    label: format!("{} {}", domain.label(), slice.label()),
                    domain,
                    slice,
                    normalized: paths.normalized(slice).to_path_buf(),
                    baseline,
                }
            })
        })
        .collect()
}
