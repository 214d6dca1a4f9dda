//! Validation report for one domain.

use serde::Serialize;

use tome_model::Domain;

use crate::issue::{Issue, Severity};

/// One issue on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Position in the dataset.
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub severity: Severity,
    pub issue: Issue,
}

impl Finding {
    /// `#3 (Goblin)`-style record reference.
    pub fn record_label(&self) -> String {
        match &self.name {
            Some(name) => format!("#{} ({name})", self.index),
            None => format!("#{}", self.index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub domain: Domain,
    pub record_count: usize,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(domain: Domain, record_count: usize) -> Self {
        Self {
            domain,
            record_count,
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Sort findings by record position, errors first within a record.
    pub fn sort(&mut self) {
        self.findings
            .sort_by(|a, b| a.index.cmp(&b.index).then(a.severity.cmp(&b.severity)));
    }

    /// One line per finding, for the validation log.
    pub fn log_lines(&self) -> Vec<String> {
        self.findings
            .iter()
            .map(|finding| {
                format!(
                    "[{}] {} record {}: {}",
                    finding.severity.label().to_uppercase(),
                    self.domain,
                    finding.record_label(),
                    finding.issue.format_message()
                )
            })
            .collect()
    }
}

/// Render reports as the text of a validation log.
pub fn render_log(reports: &[ValidationReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "# {}: {} records, {} errors, {} warnings\n",
            report.domain,
            report.record_count,
            report.error_count(),
            report.warning_count()
        ));
        for line in report.log_lines() {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
