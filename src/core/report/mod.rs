//! Compliance report generation
//!
//! This module renders a computed [`ComplianceReport`] into the formats a
//! family actually files (Markdown, HTML). Rendering only formats what the
//! matrix builder computed; it never alters counts.

pub mod formats;

use crate::core::matrix::ComplianceReport;
use crate::core::models::Student;
use crate::core::window::ResolvedWindow;
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Name of the association used when the family files independently
pub const INDEPENDENT_ASSOCIATION: &str = "Independent";

/// Data context for report generation
///
/// Aggregates everything needed to render one compliance record, providing a
/// single source of truth for templates.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Student the record is for
    pub student: &'a Student,
    /// Association name, when the family belongs to one
    pub association: Option<&'a str>,
    /// The resolved academic-year window
    pub window: &'a ResolvedWindow,
    /// Computed attendance matrix and tallies
    pub report: &'a ComplianceReport,
    /// Date the report was generated
    pub generated: NaiveDate,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        student: &'a Student,
        association: Option<&'a str>,
        window: &'a ResolvedWindow,
        report: &'a ComplianceReport,
        generated: NaiveDate,
    ) -> Self {
        Self {
            student,
            association,
            window,
            report,
            generated,
        }
    }

    /// Association name for display
    #[must_use]
    pub fn association_name(&self) -> &str {
        self.association.unwrap_or(INDEPENDENT_ASSOCIATION)
    }

    /// Grade label for display (custom grade wins)
    #[must_use]
    pub fn grade_label(&self) -> &str {
        self.student.grade_label()
    }

    /// Academic year label (e.g., "2023-2024")
    #[must_use]
    pub fn year_label(&self) -> &str {
        &self.window.label
    }

    /// Completion status line for the report footer
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.report.is_complete() {
            format!(
                "The required {} instructional days have been completed.",
                self.report.requirement
            )
        } else {
            format!(
                "{} of {} required instructional days completed ({} remaining).",
                self.report.total_days, self.report.requirement, self.report.days_remaining
            )
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Conventional filename for a compliance record:
/// `Compliance_Record_<slug>_<label>.<ext>`
#[must_use]
pub fn report_filename(student: &Student, label: &str, format: ReportFormat) -> String {
    format!(
        "Compliance_Record_{}_{}.{}",
        student.slug(),
        label,
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_follows_convention() {
        let student = Student::new("Eliza Day".to_string(), "4th Grade".to_string());
        assert_eq!(
            report_filename(&student, "2023-2024", ReportFormat::Markdown),
            "Compliance_Record_eliza-day_2023-2024.md"
        );
        assert_eq!(
            report_filename(&student, "2024", ReportFormat::Html),
            "Compliance_Record_eliza-day_2024.html"
        );
    }
}
