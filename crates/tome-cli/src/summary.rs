use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tome_core::{DomainFailure, PipelineReport};
use tome_model::Domain;
use tome_report::{FieldDiff, Snapshot};
use tome_validate::{Finding, Severity, ValidationReport};

use crate::types::{AggregateResult, ValidateResult};

pub fn print_pipeline_summary(report: &PipelineReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Status"),
        header_cell("SRD"),
        header_cell("Custom"),
        header_cell("Merged"),
        header_cell("Time (ms)"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_merged = 0usize;
    for outcome in &report.succeeded {
        total_merged += outcome.merged_records.unwrap_or_default();
        table.add_row(vec![
            domain_cell(outcome.domain),
            ok_cell(),
            Cell::new(outcome.base_records),
            Cell::new(outcome.custom_records),
            count_cell(outcome.merged_records),
            Cell::new(outcome.duration_ms),
        ]);
    }
    for failure in &report.failed {
        table.add_row(vec![
            domain_cell(failure.domain),
            failed_cell(),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        Cell::new(format!(
            "{} ok, {} failed",
            report.succeeded.len(),
            report.failed.len()
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total_merged).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_failures(&report.failed);
}

pub fn print_aggregate_summary(result: &AggregateResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Domain"), header_cell("Merged records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (domain, count) in &result.merged {
        table.add_row(vec![domain_cell(*domain), Cell::new(count)]);
    }
    println!("{table}");
    print_failures(&result.failures);
}

pub fn print_validation_summary(result: &ValidateResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Records"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for report in &result.reports {
        table.add_row(vec![
            domain_cell(report.domain),
            Cell::new(report.record_count),
            issue_count_cell(report.error_count(), Color::Red),
            issue_count_cell(report.warning_count(), Color::Yellow),
        ]);
    }
    println!("{table}");
    print_issue_table(&result.reports);
    println!("Validation log: {}", result.log_path.display());
    print_failures(&result.failures);
}

/// At most this many issue rows are printed; the log has all of them.
const MAX_ISSUE_ROWS: usize = 50;

fn print_issue_table(reports: &[ValidationReport]) {
    let mut issues: Vec<(Domain, &Finding)> = reports
        .iter()
        .flat_map(|report| report.findings.iter().map(move |f| (report.domain, f)))
        .collect();
    if issues.is_empty() {
        return;
    }
    issues.sort_by_key(|(domain, finding)| (finding.severity, *domain, finding.index));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Severity"),
        header_cell("Record"),
        header_cell("Field"),
        header_cell("Category"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (domain, finding) in issues.iter().take(MAX_ISSUE_ROWS) {
        table.add_row(vec![
            domain_cell(*domain),
            severity_cell(finding.severity),
            Cell::new(finding.record_label()),
            Cell::new(finding.issue.field().unwrap_or("-")),
            Cell::new(finding.issue.category().label()),
            Cell::new(finding.issue.format_message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    if issues.len() > MAX_ISSUE_ROWS {
        println!("... {} more", issues.len() - MAX_ISSUE_ROWS);
    }
}

pub fn print_snapshot(snapshot: &Snapshot, path: &Path) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dataset"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for count in &snapshot.counts {
        table.add_row(vec![Cell::new(&count.label), Cell::new(count.records)]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        Cell::new(snapshot.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Snapshot counts written to {}", path.display());
}

pub fn print_diff_summary(diffs: &[FieldDiff], path: &Path) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Added"),
        header_cell("Removed"),
        header_cell("Type changes"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for diff in diffs {
        table.add_row(vec![
            Cell::new(&diff.label),
            issue_count_cell(diff.added.len(), Color::Green),
            issue_count_cell(diff.removed.len(), Color::Red),
            issue_count_cell(diff.changed.len(), Color::Yellow),
        ]);
    }
    println!("{table}");
    println!("Breaking changes report generated: {}", path.display());
}

fn print_failures(failures: &[DomainFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for failure in failures {
        eprintln!("- {}: {}", failure.domain, failure.error);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn domain_cell(domain: Domain) -> Cell {
    Cell::new(domain.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn ok_cell() -> Cell {
    Cell::new("✓")
        .fg(Color::Green)
        .add_attribute(Attribute::Bold)
}

fn failed_cell() -> Cell {
    Cell::new("FAILED")
        .fg(Color::Red)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn issue_count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
