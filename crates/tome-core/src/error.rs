//! Error types for aggregation, the dataset store, and the pipeline driver.

use std::path::PathBuf;

use thiserror::Error;

use tome_ingest::IngestError;
use tome_model::{CatalogError, Domain};

use crate::pipeline::Slice;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Normalization or aggregation rejected the data.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Reading or writing a dataset file failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// One slice of a domain could not be normalized.
    #[error("{domain} {slice} dataset: {source}")]
    Normalize {
        domain: Domain,
        slice: Slice,
        #[source]
        source: CatalogError,
    },

    /// One slice of a domain could not be read.
    #[error("{domain} {slice} dataset: {source}")]
    Load {
        domain: Domain,
        slice: Slice,
        #[source]
        source: IngestError,
    },

    /// Normalized records could not be converted for output.
    #[error("failed to serialize {domain} records: {source}")]
    Serialize {
        domain: Domain,
        #[source]
        source: serde_json::Error,
    },

    /// A store may load each domain once.
    #[error("dataset '{domain}' is already loaded")]
    AlreadyLoaded { domain: Domain },

    // === Configuration Errors ===
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
