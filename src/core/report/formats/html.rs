//! HTML report generator
//!
//! Generates compliance records as self-contained HTML with embedded CSS,
//! suitable for preview in a browser or conversion to PDF.

use crate::core::matrix::DayCell;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        output = output.replace("{{student_name}}", &escape_html(&ctx.student.name));
        output = output.replace("{{grade}}", &escape_html(ctx.grade_label()));
        output = output.replace("{{association}}", &escape_html(ctx.association_name()));
        output = output.replace("{{academic_year}}", ctx.year_label());
        output = output.replace("{{total_days}}", &ctx.report.total_days.to_string());
        output = output.replace(
            "{{days_remaining}}",
            &ctx.report.days_remaining.to_string(),
        );
        output = output.replace(
            "{{progress_percent}}",
            &ctx.report.progress_percent().to_string(),
        );
        output = output.replace("{{status_line}}", &escape_html(&ctx.status_line()));
        output = output.replace(
            "{{generated_date}}",
            &ctx.generated.format("%B %d, %Y").to_string(),
        );

        let grid = Self::generate_grid_html(ctx);
        output = output.replace("{{attendance_grid}}", &grid);

        let subjects = Self::generate_subject_html(ctx);
        output = output.replace("{{subject_summary}}", &subjects);

        output
    }

    /// Generate the month-by-day attendance grid as an HTML table
    fn generate_grid_html(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("<table class=\"grid\">\n<tr><th>Month</th>");
        for day in 1..=31 {
            let _ = write!(table, "<th>{day}</th>");
        }
        table.push_str("<th>Total</th></tr>\n");

        for month in &ctx.report.months {
            let _ = write!(table, "<tr><td class=\"month\">{} {}</td>", month.name, month.year);
            for cell in &month.days {
                match cell {
                    DayCell::Attended => table.push_str("<td class=\"attended\">X</td>"),
                    DayCell::Empty => table.push_str("<td></td>"),
                    DayCell::Invalid => table.push_str("<td class=\"invalid\"></td>"),
                }
            }
            let total = if month.total_attended > 0 {
                month.total_attended.to_string()
            } else {
                String::new()
            };
            let _ = writeln!(table, "<td>{total}</td></tr>");
        }

        table.push_str("</table>");
        table
    }

    /// Generate the per-subject day-count list as HTML
    fn generate_subject_html(ctx: &ReportContext) -> String {
        if ctx.report.subject_tally.is_empty() {
            return "<p>No subjects recorded.</p>".to_string();
        }

        let mut list = String::from("<ul class=\"subjects\">\n");
        for (subject, days) in &ctx.report.subject_tally {
            let label = if *days == 1 { "day" } else { "days" };
            let _ = writeln!(
                list,
                "  <li>{}: {days} {label}</li>",
                escape_html(subject)
            );
        }
        list.push_str("</ul>");
        list
    }
}

/// Minimal HTML escaping for user-supplied text
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matrix::build_compliance_report;
    use crate::core::models::{AttendanceMap, Student};
    use crate::core::window::ResolvedWindow;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn renders_self_contained_html() {
        let student = Student::new("Eliza Day".to_string(), "4th Grade".to_string());
        let window = ResolvedWindow {
            start: date(2024, 9, 1),
            end: date(2024, 9, 30),
            label: "2024".to_string(),
        };

        let mut records = AttendanceMap::new();
        records.insert(date(2024, 9, 5), vec!["Math".to_string()]);
        let report = build_compliance_report(&records, &window, 180).expect("report");

        let ctx = ReportContext::new(
            &student,
            Some("Palmetto HSA"),
            &window,
            &report,
            date(2024, 10, 1),
        );
        let rendered = HtmlReporter::new().render(&ctx).expect("render");

        assert!(rendered.contains("<!DOCTYPE html>"));
        assert!(rendered.contains("Eliza Day"));
        assert!(rendered.contains("Palmetto HSA"));
        assert!(rendered.contains("class=\"attended\""));
        assert!(rendered.contains("class=\"invalid\""));
        assert!(rendered.contains("Math: 1 day"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn escapes_user_text() {
        let student = Student::new("A <b> & \"Q\"".to_string(), "1st Grade".to_string());
        let window = ResolvedWindow {
            start: date(2024, 9, 1),
            end: date(2024, 9, 30),
            label: "2024".to_string(),
        };
        let report =
            build_compliance_report(&AttendanceMap::new(), &window, 180).expect("report");

        let ctx = ReportContext::new(&student, None, &window, &report, date(2024, 10, 1));
        let rendered = HtmlReporter::new().render(&ctx).expect("render");
        assert!(rendered.contains("A &lt;b&gt; &amp; &quot;Q&quot;"));
    }
}
