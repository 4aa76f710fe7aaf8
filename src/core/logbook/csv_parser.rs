//! CSV parser for attendance logbook files
//!
//! A logbook file starts with a metadata section of `Key,Value` lines
//! (student name, grade, subjects, academic-year months, association),
//! followed by a line containing `Records`, a header row, and one line per
//! logged school day:
//!
//! ```text
//! Student,Eliza Day
//! Grade,4th Grade
//! Subjects,Art;Spanish
//! Year Start,8
//! Year End,7
//! Association,Palmetto Homeschool Association
//! Required Days,170
//!
//! Records
//! Date,Subjects,Notes
//! 2024-09-05,Math;Science,Library day
//! ```
//!
//! Fields are plain comma-separated values; subject lists within a field use
//! semicolons. Dates are ISO `YYYY-MM-DD`.

use crate::core::logbook::Logbook;
use crate::core::models::association::DEFAULT_REQUIRED_DAYS;
use crate::core::models::{AcademicYearConfig, Association, AttendanceRecord, Student};
use chrono::NaiveDate;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Parsed logbook metadata from the header section
#[derive(Debug, Clone)]
struct LogbookMetadata {
    name: String,
    grade_level: String,
    custom_grade_level: Option<String>,
    subjects: Vec<String>,
    start_month: Option<u32>,
    end_month: Option<u32>,
    association: Option<String>,
    required_days: Option<u32>,
}

/// Parse a logbook CSV file into a [`Logbook`].
///
/// `default_year` supplies the academic-year months for logbooks whose
/// metadata doesn't set `Year Start`/`Year End` (normally the configured
/// compliance defaults).
///
/// # Errors
/// Returns an error if the file cannot be read, required metadata is
/// missing, the month configuration is out of range, a record line carries
/// an unparseable date, or a date appears twice.
pub fn parse_logbook_csv<P: AsRef<Path>>(
    path: P,
    default_year: &AcademicYearConfig,
) -> Result<Logbook, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();

    let metadata = parse_metadata(&lines)?;

    let mut student = Student::new(metadata.name, metadata.grade_level);
    student.custom_grade_level = metadata.custom_grade_level;
    student.subjects = metadata.subjects;
    student.year = AcademicYearConfig::new(
        metadata.start_month.unwrap_or(default_year.start_month),
        metadata.end_month.unwrap_or(default_year.end_month),
    );
    student.year.validate()?;

    let mut logbook = Logbook::new(student);
    logbook.association = metadata
        .association
        .map(|name| Association::new(name, metadata.required_days.unwrap_or(DEFAULT_REQUIRED_DAYS)));

    // Find the records section
    let records_start = lines
        .iter()
        .position(|line| line.to_lowercase().starts_with("records"));

    // A logbook with no records section is valid: a fresh year with nothing
    // logged yet
    let Some(records_start) = records_start else {
        return Ok(logbook);
    };

    if records_start + 1 >= lines.len() {
        return Ok(logbook);
    }

    let headers = parse_csv_line(lines[records_start + 1]);

    for line in lines.iter().skip(records_start + 2) {
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record_line(line, &headers)?;
        logbook.add_record(record)?;
    }

    Ok(logbook)
}

/// Parse logbook metadata from the header section
fn parse_metadata(lines: &[&str]) -> Result<LogbookMetadata, Box<dyn Error>> {
    let mut metadata = LogbookMetadata {
        name: String::new(),
        grade_level: String::new(),
        custom_grade_level: None,
        subjects: Vec::new(),
        start_month: None,
        end_month: None,
        association: None,
        required_days: None,
    };

    for line in lines {
        let lowered = line.to_lowercase();
        if lowered.starts_with("records") {
            break;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 2 || parts[1].is_empty() {
            continue;
        }

        let key = parts[0].to_lowercase();
        let value = parts[1].to_string();

        match key.as_str() {
            "student" => metadata.name = value,
            "grade" => metadata.grade_level = value,
            "custom grade" => metadata.custom_grade_level = Some(value),
            "subjects" => metadata.subjects = split_subjects(&value),
            "year start" => {
                metadata.start_month = Some(parse_month(&value, "Year Start")?);
            }
            "year end" => {
                metadata.end_month = Some(parse_month(&value, "Year End")?);
            }
            "association" => metadata.association = Some(value),
            "required days" => {
                let days = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid Required Days value: '{value}'"))?;
                metadata.required_days = Some(days);
            }
            _ => {}
        }
    }

    // Validate required fields
    if metadata.name.is_empty() {
        return Err("Missing Student name".into());
    }
    if metadata.grade_level.is_empty() {
        return Err("Missing Grade".into());
    }

    Ok(metadata)
}

/// Parse a month metadata value, keeping the key name in the error
fn parse_month(value: &str, key: &str) -> Result<u32, Box<dyn Error>> {
    let month = value
        .parse::<u32>()
        .map_err(|_| format!("Invalid {key} value: '{value}'"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("{key} month {month} is out of range (expected 1-12)").into());
    }
    Ok(month)
}

/// Parse a CSV line into fields
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}

/// Split a semicolon-separated subject list, dropping empties and duplicates
fn split_subjects(value: &str) -> Vec<String> {
    let mut subjects = Vec::new();
    for subject in value.split(';').map(str::trim) {
        if !subject.is_empty() && !subjects.iter().any(|s| s == subject) {
            subjects.push(subject.to_string());
        }
    }
    subjects
}

/// Parse a single record line from the CSV
fn parse_record_line(line: &str, headers: &[String]) -> Result<AttendanceRecord, Box<dyn Error>> {
    let date_str = get_field(line, "Date", headers)
        .ok_or_else(|| format!("Record line is missing a Date field: '{line}'"))?;
    let date = date_str
        .parse::<NaiveDate>()
        .map_err(|_| format!("Invalid record date: '{date_str}' (expected YYYY-MM-DD)"))?;

    let mut record = AttendanceRecord::new(date);

    if let Some(subjects) = get_field(line, "Subjects", headers) {
        record.subjects = split_subjects(subjects);
    }

    if let Some(notes) = get_field(line, "Notes", headers) {
        if !notes.is_empty() {
            record.notes = Some(notes.to_string());
        }
    }

    Ok(record)
}

/// Get a field value from a CSV line by header name
fn get_field<'a>(line: &'a str, name: &str, headers: &[String]) -> Option<&'a str> {
    let index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))?;
    line.split(',').map(str::trim).nth(index)
}
