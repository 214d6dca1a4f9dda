//! Normalized artifact codec.
//!
//! A normalized artifact is a JSON document:
//!
//! ```json
//! {
//!   "__normalized": true,
//!   "__domain": "monsters",
//!   "generator": "tome 0.4.0",
//!   "source": "monsters-SRD.js",
//!   "records": [ ... ]
//! }
//! ```
//!
//! Readers refuse anything that does not carry both flags, so a raw dataset
//! can never be mistaken for a normalized one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use tome_model::{Domain, type_name};

use crate::error::{IngestError, Result};

/// Generator tag written into every artifact.
pub const GENERATOR: &str = concat!("tome ", env!("CARGO_PKG_VERSION"));

/// On-disk form of a normalized dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedArtifact {
    #[serde(rename = "__normalized")]
    pub normalized: bool,
    #[serde(rename = "__domain")]
    pub domain: String,
    #[serde(default)]
    pub generator: String,
    /// File name of the raw input, or `None` for merged artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub records: Vec<Value>,
}

impl NormalizedArtifact {
    pub fn new(domain: Domain, source: Option<String>, records: Vec<Value>) -> Self {
        Self {
            normalized: true,
            domain: domain.as_str().to_string(),
            generator: GENERATOR.to_string(),
            source,
            records,
        }
    }
}

/// Load the records of a normalized artifact, enforcing the guard rails.
pub fn load_artifact(path: &Path, domain: Domain) -> Result<Vec<Value>> {
    read_artifact(path, domain).map(|artifact| artifact.records)
}

/// Load a whole normalized artifact, enforcing the guard rails.
pub fn read_artifact(path: &Path, domain: Domain) -> Result<NormalizedArtifact> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if document.get("__normalized") != Some(&Value::Bool(true)) {
        return Err(IngestError::NotNormalized {
            path: path.to_path_buf(),
        });
    }
    let found = document
        .get("__domain")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if found != domain.as_str() {
        return Err(IngestError::DomainMismatch {
            path: path.to_path_buf(),
            expected: domain.as_str().to_string(),
            found: found.to_string(),
        });
    }
    match document.get("records") {
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(IngestError::NotAnArray {
                path: path.to_path_buf(),
                found: type_name(other),
            });
        }
        None => {
            return Err(IngestError::NotAnArray {
                path: path.to_path_buf(),
                found: "nothing",
            });
        }
    }

    serde_json::from_value(document).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an artifact atomically (temp file + rename).
///
/// A failure leaves any previous artifact at `path` untouched and removes
/// the temp file.
pub fn write_artifact(path: &Path, artifact: &NormalizedArtifact) -> Result<()> {
    stage_artifact(path, artifact)?.commit()
}

/// An artifact fully written and synced to its temp file, not yet renamed
/// onto its target. Dropping it without [`commit`](Self::commit) or
/// [`discard`](Self::discard) leaves the temp file behind.
#[derive(Debug)]
#[must_use = "a staged artifact must be committed or discarded"]
pub struct StagedArtifact {
    temp_path: PathBuf,
    target_path: PathBuf,
    domain: String,
    records: usize,
}

impl StagedArtifact {
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Rename the temp file onto the target.
    pub fn commit(self) -> Result<()> {
        if let Err(source) = fs::rename(&self.temp_path, &self.target_path) {
            remove_temp(&self.temp_path);
            return Err(IngestError::AtomicWriteFailed {
                temp_path: self.temp_path,
                target_path: self.target_path,
                source,
            });
        }
        info!(
            path = %self.target_path.display(),
            domain = %self.domain,
            records = self.records,
            "wrote normalized artifact"
        );
        Ok(())
    }

    /// Drop the temp file without touching the target.
    pub fn discard(self) {
        remove_temp(&self.temp_path);
    }
}

/// Serialize `artifact` into `<path>.tmp` and sync it, leaving the target
/// untouched until [`StagedArtifact::commit`].
pub fn stage_artifact(path: &Path, artifact: &NormalizedArtifact) -> Result<StagedArtifact> {
    let mut bytes = serde_json::to_vec_pretty(artifact).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|source| IngestError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    let written = file
        .write_all(&bytes)
        .map_err(|source| ("write", source))
        .and_then(|()| file.sync_all().map_err(|source| ("sync", source)));
    if let Err((operation, source)) = written {
        drop(file);
        remove_temp(&temp_path);
        return Err(IngestError::Io {
            operation,
            path: temp_path,
            source,
        });
    }

    Ok(StagedArtifact {
        temp_path,
        target_path: path.to_path_buf(),
        domain: artifact.domain.clone(),
        records: artifact.records.len(),
    })
}

fn remove_temp(temp_path: &Path) {
    if let Err(error) = fs::remove_file(temp_path) {
        warn!(path = %temp_path.display(), %error, "could not remove temp file");
    }
}
