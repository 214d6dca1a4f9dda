//! Catalog file I/O: legacy raw datasets in, normalized artifacts out.

pub mod artifact;
pub mod error;
pub mod legacy;

pub use artifact::{
    GENERATOR, NormalizedArtifact, StagedArtifact, load_artifact, read_artifact, stage_artifact,
    write_artifact,
};
pub use error::{IngestError, Result};
pub use legacy::{LegacyDataset, load_legacy, parse_script};
