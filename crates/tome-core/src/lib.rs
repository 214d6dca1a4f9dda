//! Aggregation, the per-run dataset store, and the normalization pipeline.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;

pub use aggregate::{aggregate, aggregate_values};
pub use config::{CONFIG_FILE, DomainPaths, ProjectConfig, ROOT_ENV_VAR};
pub use error::{PipelineError, Result};
pub use pipeline::{
    DomainFailure, DomainOutcome, PipelineReport, Slice, merge_artifacts, merge_domain,
    normalize_domain, run_pipeline,
};
pub use store::{DatasetStore, Records};
