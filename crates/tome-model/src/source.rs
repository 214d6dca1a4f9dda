use serde::{Deserialize, Serialize};

/// Citation of the rulebook a record comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Book or supplement abbreviation (e.g. "SRD").
    pub source: String,
    /// Page reference. Legacy data often leaves this null.
    #[serde(default)]
    pub page: Option<String>,
}

impl SourceRef {
    pub fn new(source: impl Into<String>, page: Option<String>) -> Self {
        Self {
            source: source.into(),
            page,
        }
    }
}
