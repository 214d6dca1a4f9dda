use std::path::PathBuf;

use tome_core::DomainFailure;
use tome_model::Domain;
use tome_validate::ValidationReport;

/// Merged artifacts rebuilt by `tome aggregate`.
#[derive(Debug, Default)]
pub struct AggregateResult {
    pub merged: Vec<(Domain, usize)>,
    pub failures: Vec<DomainFailure>,
}

impl AggregateResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct ValidateResult {
    pub reports: Vec<ValidationReport>,
    /// Domains whose dataset could not be loaded.
    pub failures: Vec<DomainFailure>,
    pub log_path: PathBuf,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || self.reports.iter().any(ValidationReport::has_errors)
    }
}
