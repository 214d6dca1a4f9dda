use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use tome_core::{
    DatasetStore, DomainFailure, PipelineReport, ProjectConfig, merge_domain, run_pipeline,
};
use tome_model::Domain;
use tome_report::{
    FieldDiff, Snapshot, build_report, generated_at, render_markdown, take_snapshot,
    write_report, write_snapshot,
};
use tome_validate::{render_log, validate_records};

use crate::summary::{apply_table_style, header_cell};
use crate::types::{AggregateResult, ValidateResult};

/// Validation log file name inside the reports directory.
pub const VALIDATION_LOG: &str = "validation-errors.log";

/// Resolve the project root and read its configuration.
pub fn load_config(root: Option<&Path>) -> Result<ProjectConfig> {
    let root = ProjectConfig::resolve_root(root);
    ProjectConfig::load(&root).with_context(|| format!("load config from {}", root.display()))
}

/// Requested domains in pipeline order; all domains when none are given.
pub fn selected_domains(requested: &[Domain]) -> Vec<Domain> {
    if requested.is_empty() {
        return Domain::ALL.to_vec();
    }
    Domain::ALL
        .into_iter()
        .filter(|domain| requested.contains(domain))
        .collect()
}

pub fn run_domains() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Label"),
        header_cell("Id prefix"),
    ]);
    apply_table_style(&mut table);
    for domain in Domain::ALL {
        table.add_row(vec![domain.as_str(), domain.label(), domain.id_prefix()]);
    }
    println!("{table}");
}

pub fn run_normalize(config: &ProjectConfig, domains: &[Domain]) -> PipelineReport {
    let span = info_span!("normalize_all", root = %config.root.display());
    let _guard = span.enter();
    run_pipeline(config, domains)
}

pub fn run_aggregate(config: &ProjectConfig, domains: &[Domain]) -> AggregateResult {
    let mut result = AggregateResult::default();
    for &domain in domains {
        match merge_domain(config, domain) {
            Ok(count) => result.merged.push((domain, count)),
            Err(error) => {
                warn!(domain = %domain, error = %error, "aggregation failed");
                result.failures.push(DomainFailure { domain, error });
            }
        }
    }
    result
}

/// Validate merged artifacts and write the validation log.
pub fn run_validate(config: &ProjectConfig, domains: &[Domain]) -> Result<ValidateResult> {
    let mut store = DatasetStore::new(config.clone());
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for &domain in domains {
        match store.load_dataset(domain) {
            Ok(records) => reports.push(validate_records(domain, &records)),
            Err(error) => {
                warn!(domain = %domain, error = %error, "dataset could not be loaded");
                failures.push(DomainFailure { domain, error });
            }
        }
    }

    let mut log = render_log(&reports);
    for failure in &failures {
        log.push_str(&format!("[ERROR] {}: {}\n", failure.domain, failure.error));
    }
    let log_path = write_text(&config.reports_dir(), VALIDATION_LOG, &log)?;
    info!(path = %log_path.display(), "validation log written");

    Ok(ValidateResult {
        reports,
        failures,
        log_path,
    })
}

pub fn run_snapshot(config: &ProjectConfig) -> Result<(Snapshot, PathBuf)> {
    let snapshot = take_snapshot(config).context("count normalized datasets")?;
    let path = write_snapshot(&config.reports_dir(), &snapshot)?;
    Ok((snapshot, path))
}

pub fn run_diff(config: &ProjectConfig) -> Result<(Vec<FieldDiff>, PathBuf)> {
    let diffs = build_report(config).context("generate breaking-changes report")?;
    let markdown = render_markdown(&diffs, &generated_at());
    let path = write_report(&config.reports_dir(), &markdown)?;
    Ok((diffs, path))
}

fn write_text(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
