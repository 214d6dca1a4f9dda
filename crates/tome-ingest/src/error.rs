//! Error types for dataset ingestion and artifact I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or writing catalog files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Dataset or artifact file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O failure on a specific file.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rename of the temp file onto the target failed.
    #[error("atomic write failed: could not rename {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Legacy Script Errors ===
    /// A legacy script must declare exactly one global array.
    #[error("{path}: expected exactly one global declaration, found {count}")]
    GlobalCount { path: PathBuf, count: usize },

    /// The declared global is not an array literal we can read.
    #[error("{path}: {reason}")]
    LegacyParse { path: PathBuf, reason: String },

    // === Payload Errors ===
    /// Malformed JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset payload is not a sequence.
    #[error("{path}: expected an array of records, found {found}")]
    NotAnArray { path: PathBuf, found: &'static str },

    // === Artifact Guard Rails ===
    /// The artifact does not carry `"__normalized": true`.
    #[error("{path} is not a normalized artifact (missing \"__normalized\": true)")]
    NotNormalized { path: PathBuf },

    /// The artifact belongs to another domain.
    #[error("{path} holds domain '{found}', expected '{expected}'")]
    DomainMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::GlobalCount {
            path: PathBuf::from("data/spells-SRD.js"),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "data/spells-SRD.js: expected exactly one global declaration, found 2"
        );
    }

    #[test]
    fn test_domain_mismatch_display() {
        let err = IngestError::DomainMismatch {
            path: PathBuf::from("monsters.normalized.json"),
            expected: "monsters".to_string(),
            found: "spells".to_string(),
        };
        assert!(err.to_string().contains("expected 'monsters'"));
    }
}
