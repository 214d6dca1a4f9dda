//! Per-domain normalization driver.
//!
//! Each domain runs independently: load the raw base and custom datasets,
//! normalize both, and only then write both normalized artifacts. A failure
//! while loading, normalizing or staging aborts that domain alone and leaves
//! its previous artifacts untouched.
//!
//! The two artifacts are staged to temp files before either is renamed into
//! place, but the pair is not atomic: if the custom rename fails after the
//! base rename succeeded, the new base artifact sits next to the previous
//! custom one.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, info_span, warn};

use tome_ingest::{
    NormalizedArtifact, load_artifact, load_legacy, stage_artifact, write_artifact,
};
use tome_model::Domain;
use tome_normalize::normalize;

use crate::aggregate::aggregate_values;
use crate::config::{DomainPaths, ProjectConfig};
use crate::error::{PipelineError, Result};

/// Which of a domain's two datasets an operation is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Base,
    Custom,
}

impl Slice {
    pub const ALL: [Slice; 2] = [Slice::Base, Slice::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slice::Base => "base",
            Slice::Custom => "custom",
        }
    }

    /// Report label ("SRD" / "Custom").
    pub fn label(&self) -> &'static str {
        match self {
            Slice::Base => "SRD",
            Slice::Custom => "Custom",
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful domain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOutcome {
    pub domain: Domain,
    pub base_records: usize,
    pub custom_records: usize,
    /// Size of the merged artifact, when one was written.
    pub merged_records: Option<usize>,
    pub duration_ms: u128,
}

#[derive(Debug)]
pub struct DomainFailure {
    pub domain: Domain,
    pub error: PipelineError,
}

/// Outcome of a multi-domain run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub succeeded: Vec<DomainOutcome>,
    pub failed: Vec<DomainFailure>,
}

impl PipelineReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Normalize every selected domain, then rebuild the merged artifact of each
/// domain that succeeded.
pub fn run_pipeline(config: &ProjectConfig, domains: &[Domain]) -> PipelineReport {
    let mut report = PipelineReport::default();
    for &domain in domains {
        let result = normalize_domain(config, domain).and_then(|mut outcome| {
            outcome.merged_records = Some(merge_domain(config, domain)?);
            Ok(outcome)
        });
        match result {
            Ok(outcome) => report.succeeded.push(outcome),
            Err(error) => {
                warn!(domain = %domain, error = %error, "domain failed");
                report.failed.push(DomainFailure { domain, error });
            }
        }
    }
    report
}

/// Normalize one domain's base and custom datasets and write both artifacts.
pub fn normalize_domain(config: &ProjectConfig, domain: Domain) -> Result<DomainOutcome> {
    let span = info_span!("normalize", domain = %domain);
    let _guard = span.enter();
    let start = Instant::now();
    let paths = config.domain_paths(domain);

    let base = normalize_slice(&paths, Slice::Base)?;
    let custom = normalize_slice(&paths, Slice::Custom)?;

    let base_records = base.records.len();
    let custom_records = custom.records.len();
    write_pair(&paths, &base, &custom)?;

    let duration_ms = start.elapsed().as_millis();
    info!(
        domain = %domain,
        base_records,
        custom_records,
        duration_ms,
        "normalization complete"
    );
    Ok(DomainOutcome {
        domain,
        base_records,
        custom_records,
        merged_records: None,
        duration_ms,
    })
}

/// Stage both artifacts, then rename them base first.
fn write_pair(
    paths: &DomainPaths,
    base: &NormalizedArtifact,
    custom: &NormalizedArtifact,
) -> Result<()> {
    let staged_base = stage_artifact(&paths.base_normalized, base)?;
    let staged_custom = match stage_artifact(&paths.custom_normalized, custom) {
        Ok(staged) => staged,
        Err(error) => {
            staged_base.discard();
            return Err(error.into());
        }
    };
    if let Err(error) = staged_base.commit() {
        staged_custom.discard();
        return Err(error.into());
    }
    staged_custom.commit()?;
    Ok(())
}

fn normalize_slice(paths: &DomainPaths, slice: Slice) -> Result<NormalizedArtifact> {
    let domain = paths.domain;
    let path = paths.raw(slice);
    let raw = load_legacy(path).map_err(|source| PipelineError::Load {
        domain,
        slice,
        source,
    })?;
    let dataset = normalize(domain, &raw.records).map_err(|source| PipelineError::Normalize {
        domain,
        slice,
        source,
    })?;
    let records = dataset
        .to_values()
        .map_err(|source| PipelineError::Serialize { domain, source })?;
    Ok(NormalizedArtifact::new(domain, file_name(path), records))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Aggregate the normalized base and custom artifacts of `domain` and write
/// the merged artifact. Returns the merged record count.
pub fn merge_domain(config: &ProjectConfig, domain: Domain) -> Result<usize> {
    let paths = config.domain_paths(domain);
    let records = merge_artifacts(&paths)?;
    let count = records.len();
    write_artifact(&paths.merged, &NormalizedArtifact::new(domain, None, records))?;
    Ok(count)
}

/// Aggregate the normalized artifacts of one domain without writing anything.
pub fn merge_artifacts(paths: &DomainPaths) -> Result<Vec<Value>> {
    let domain = paths.domain;
    let base = load_artifact(&paths.base_normalized, domain)?;
    let custom = load_artifact(&paths.custom_normalized, domain)?;
    let merged = aggregate_values(domain.as_str(), Value::Array(base), Value::Array(custom))?;
    Ok(merged)
}
