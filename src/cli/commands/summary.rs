//! Summary command handler
//!
//! Prints an attendance dashboard for one or more logbooks: days completed,
//! days remaining, progress, and the subject tally for each student's
//! current academic year.

use hs_ledger::config::Config;
use hs_ledger::core::{
    logbook::{parse_logbook_csv, AttendanceSource},
    matrix::build_compliance_report,
    window::{resolve_window, YearAnchor},
};
use hs_ledger::error;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Run the summary command over each logbook in turn
pub fn run(logbooks: &[PathBuf], as_of: Option<NaiveDate>, config: &Config) {
    let reference = as_of.unwrap_or_else(|| Local::now().date_naive());

    for path in logbooks {
        if let Err(err) = summarize(path, reference, config) {
            error!("Summary failed for {}: {err}", path.display());
            eprintln!("{err}");
        }
    }
}

/// Print the dashboard block for one logbook
fn summarize(path: &Path, reference: NaiveDate, config: &Config) -> Result<(), String> {
    let logbook = parse_logbook_csv(path, &config.default_year())
        .map_err(|e| format!("✗ Failed to load {}: {e}", path.display()))?;

    let window = resolve_window(
        &logbook.student.year,
        YearAnchor::Auto(reference),
        &logbook,
    )
    .map_err(|e| format!("✗ Failed to resolve academic year: {e}"))?;

    let requirement = logbook.required_days(config.default_required_days());
    let records = logbook.fetch(&window);
    let report = build_compliance_report(&records, &window, requirement)
        .map_err(|e| format!("✗ Failed to build attendance matrix: {e}"))?;

    println!(
        "\n=== {} ({}) ===",
        logbook.student.name,
        logbook.student.grade_label()
    );
    println!(
        "Academic Year: {} ({} to {})",
        window.label, window.start, window.end
    );
    println!(
        "Days Completed: {} / {} ({}%)",
        report.total_days,
        report.requirement,
        report.progress_percent()
    );
    println!("Days Remaining: {}", report.days_remaining);

    if report.is_complete() {
        println!("✓ Requirement met");
    }

    if report.subject_tally.is_empty() {
        println!("No subjects recorded.");
    } else {
        println!("Subjects:");
        for (subject, days) in &report.subject_tally {
            println!("  {subject}: {days}");
        }
    }

    Ok(())
}
