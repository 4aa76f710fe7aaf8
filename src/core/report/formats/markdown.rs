//! Markdown report generator
//!
//! Generates compliance records in Markdown format. These render well in
//! GitHub, GitLab, and VS Code, and print acceptably straight from a
//! Markdown viewer.

use crate::core::matrix::DayCell;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{student_name}}", &ctx.student.name);
        output = output.replace("{{grade}}", ctx.grade_label());
        output = output.replace("{{association}}", ctx.association_name());
        output = output.replace("{{academic_year}}", ctx.year_label());
        output = output.replace("{{total_days}}", &ctx.report.total_days.to_string());
        output = output.replace(
            "{{days_remaining}}",
            &ctx.report.days_remaining.to_string(),
        );
        output = output.replace("{{status_line}}", &ctx.status_line());
        output = output.replace(
            "{{generated_date}}",
            &ctx.generated.format("%B %d, %Y").to_string(),
        );

        // Generate the attendance grid table
        let grid_table = Self::generate_grid_table(ctx);
        output = output.replace("{{attendance_grid}}", &grid_table);

        // Generate the subject summary
        let subject_summary = Self::generate_subject_summary(ctx);
        output = output.replace("{{subject_summary}}", &subject_summary);

        output
    }

    /// Generate the month-by-day attendance grid table
    fn generate_grid_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Month |");
        for day in 1..=31 {
            let _ = write!(table, " {day} |");
        }
        table.push_str(" Total |\n");

        table.push_str("|---|");
        for _ in 1..=31 {
            table.push_str("---|");
        }
        table.push_str("---|\n");

        for month in &ctx.report.months {
            let _ = write!(table, "| {} {} |", month.name, month.year);
            for cell in &month.days {
                let mark = match cell {
                    DayCell::Attended => "X",
                    DayCell::Empty => " ",
                    DayCell::Invalid => "·",
                };
                let _ = write!(table, " {mark} |");
            }
            let total = if month.total_attended > 0 {
                month.total_attended.to_string()
            } else {
                String::new()
            };
            let _ = writeln!(table, " {total} |");
        }

        table
    }

    /// Generate the per-subject day-count list
    fn generate_subject_summary(ctx: &ReportContext) -> String {
        if ctx.report.subject_tally.is_empty() {
            return "No subjects recorded.".to_string();
        }

        let mut summary = String::new();
        for (subject, days) in &ctx.report.subject_tally {
            let label = if *days == 1 { "day" } else { "days" };
            let _ = writeln!(summary, "- {subject}: {days} {label}");
        }

        summary
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
