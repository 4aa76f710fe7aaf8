//! Report command handler
//!
//! Resolves the academic-year window for a logbook, builds the attendance
//! matrix, and writes the compliance record in the requested format.

use hs_ledger::config::Config;
use hs_ledger::core::{
    logbook::{parse_logbook_csv, AttendanceSource, Logbook},
    matrix::{build_compliance_report, ComplianceReport},
    report::{
        report_filename, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat,
        ReportGenerator,
    },
    window::{resolve_window, ResolvedWindow, YearAnchor},
};
use hs_ledger::{error, info};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `logbook_path` - Path to the logbook CSV file
/// * `year` - Explicit start year (skips auto-detection and fallback)
/// * `as_of` - Reference date for auto-detection (defaults to today)
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html, pdf)
/// * `required_days` - Optional day-requirement override
/// * `config` - Configuration with defaults and the reports directory
pub fn run(
    logbook_path: &Path,
    year: Option<i32>,
    as_of: Option<NaiveDate>,
    output_file: Option<&Path>,
    format_str: &str,
    required_days: Option<u32>,
    config: &Config,
) {
    if let Err(err) = generate_report(
        logbook_path,
        year,
        as_of,
        output_file,
        format_str,
        required_days,
        config,
    ) {
        error!(
            "Report generation failed for {}: {err}",
            logbook_path.display()
        );
        eprintln!("{err}");
    }
}

/// Prepared report data ready for rendering
struct ReportData {
    logbook: Logbook,
    window: ResolvedWindow,
    report: ComplianceReport,
}

/// Load the logbook, resolve the window, and build the matrix
fn prepare_report_data(
    logbook_path: &Path,
    year: Option<i32>,
    as_of: Option<NaiveDate>,
    required_days: Option<u32>,
    config: &Config,
) -> Result<ReportData, String> {
    let logbook = parse_logbook_csv(logbook_path, &config.default_year()).map_err(|e| {
        error!("Failed to load logbook {}: {e}", logbook_path.display());
        format!("✗ Failed to load {}: {e}", logbook_path.display())
    })?;

    info!(
        "Logbook loaded: {} ({} school days)",
        logbook_path.display(),
        logbook.len()
    );

    let anchor = year.map_or_else(
        || YearAnchor::Auto(as_of.unwrap_or_else(|| Local::now().date_naive())),
        YearAnchor::Explicit,
    );

    let window = resolve_window(&logbook.student.year, anchor, &logbook).map_err(|e| {
        error!(
            "Window resolution failed for {}: {e}",
            logbook_path.display()
        );
        format!("✗ Failed to resolve academic year: {e}")
    })?;

    info!(
        "Academic year {}: {} to {}",
        window.label, window.start, window.end
    );

    let requirement =
        required_days.unwrap_or_else(|| logbook.required_days(config.default_required_days()));

    let records = logbook.fetch(&window);
    let report = build_compliance_report(&records, &window, requirement)
        .map_err(|e| format!("✗ Failed to build attendance matrix: {e}"))?;

    Ok(ReportData {
        logbook,
        window,
        report,
    })
}

/// Write the report to a file in the specified format
fn write_report(data: &ReportData, format: ReportFormat, output_path: &Path) -> Result<(), String> {
    let ctx = ReportContext::new(
        &data.logbook.student,
        data.logbook.association_name(),
        &data.window,
        &data.report,
        Local::now().date_naive(),
    );

    match format {
        ReportFormat::Markdown => {
            let reporter = MarkdownReporter::new();
            reporter
                .generate(&ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate Markdown report: {e}"))?;
        }
        ReportFormat::Html => {
            let reporter = HtmlReporter::new();
            reporter
                .generate(&ctx, output_path)
                .map_err(|e| format!("✗ Failed to generate HTML report: {e}"))?;
        }
        ReportFormat::Pdf => {
            // For now, generate HTML and suggest conversion
            let html_path = output_path.with_extension("html");
            let reporter = HtmlReporter::new();
            reporter
                .generate(&ctx, &html_path)
                .map_err(|e| format!("✗ Failed to generate HTML for PDF: {e}"))?;
            println!(
                "ℹ PDF generation not yet implemented. HTML generated at: {}",
                html_path.display()
            );
            println!("  Use a browser or wkhtmltopdf to convert to PDF.");
        }
    }

    Ok(())
}

/// Print a summary of the report
fn print_summary(data: &ReportData) {
    println!("\n=== Summary ===");
    println!("Student: {}", data.logbook.student.name);
    println!("Grade: {}", data.logbook.student.grade_label());
    println!("Academic Year: {}", data.window.label);
    println!(
        "Days Attended: {} / {}",
        data.report.total_days, data.report.requirement
    );
    println!("Days Remaining: {}", data.report.days_remaining);

    if data.report.total_days == 0 {
        println!("⚠️  No school days logged in this academic year");
    }
}

fn generate_report(
    logbook_path: &Path,
    year: Option<i32>,
    as_of: Option<NaiveDate>,
    output_file: Option<&Path>,
    format_str: &str,
    required_days: Option<u32>,
    config: &Config,
) -> Result<(), String> {
    // Parse the format
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown, html, or pdf"))?;

    // Prepare report data
    let data = prepare_report_data(logbook_path, year, as_of, required_days, config)?;

    // Determine output path
    let final_output_path: PathBuf = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;

        let output_filename =
            report_filename(&data.logbook.student, &data.window.label, format);
        reports_dir.join(output_filename)
    };

    // Write the report
    write_report(&data, format, &final_output_path)?;

    if format != ReportFormat::Pdf {
        println!("✓ Report generated: {}", final_output_path.display());
        info!("Report exported to: {}", final_output_path.display());
    }

    print_summary(&data);

    Ok(())
}
