//! Explicit dataset store owned by one run.
//!
//! The store replaces a process-wide dataset cache: create one per run, load
//! each domain at most once, drop it when the run ends.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use tome_ingest::load_artifact;
use tome_model::Domain;

use crate::config::ProjectConfig;
use crate::error::{PipelineError, Result};
use crate::pipeline::merge_artifacts;

/// Immutable, shareable view of a loaded domain.
pub type Records = Arc<[Value]>;

#[derive(Debug)]
pub struct DatasetStore {
    config: ProjectConfig,
    datasets: BTreeMap<Domain, Records>,
}

impl DatasetStore {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            datasets: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Load the merged artifact of `domain`.
    ///
    /// Fails fast on a missing file, a non-array payload, or missing or
    /// mismatched artifact flags. A domain can be loaded once per store.
    pub fn load_dataset(&mut self, domain: Domain) -> Result<Records> {
        if self.datasets.contains_key(&domain) {
            return Err(PipelineError::AlreadyLoaded { domain });
        }
        let path = self.config.domain_paths(domain).merged;
        let records: Records = load_artifact(&path, domain)?.into();
        debug!(domain = %domain, records = records.len(), "dataset loaded");
        self.datasets.insert(domain, Arc::clone(&records));
        Ok(records)
    }

    /// Aggregate the base and custom artifacts of `domain` freshly.
    ///
    /// Nothing is cached; each call builds a new collection.
    pub fn load_merged(&self, domain: Domain) -> Result<Records> {
        let paths = self.config.domain_paths(domain);
        Ok(merge_artifacts(&paths)?.into())
    }

    pub fn get(&self, domain: Domain) -> Option<Records> {
        self.datasets.get(&domain).cloned()
    }

    pub fn contains(&self, domain: Domain) -> bool {
        self.datasets.contains_key(&domain)
    }

    /// Domains loaded so far, in domain order.
    pub fn loaded_domains(&self) -> Vec<Domain> {
        self.datasets.keys().copied().collect()
    }
}
