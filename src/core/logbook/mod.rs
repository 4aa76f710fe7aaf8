//! Attendance logbook: the data collaborator the core computes over
//!
//! A logbook holds one student's configuration and logged school days,
//! usually parsed from a logbook CSV file. The [`AttendanceSource`] trait is
//! the seam between storage and computation: the window resolver and the
//! report builder only ever see this interface, so any backing store that can
//! answer these three questions plugs in.

pub mod csv_parser;

pub use csv_parser::parse_logbook_csv;

use crate::core::models::{Association, AttendanceMap, AttendanceRecord, Student};
use crate::core::window::ResolvedWindow;
use chrono::NaiveDate;

/// Read access to a student's attendance records
pub trait AttendanceSource {
    /// All records inside the window as a date -> subjects mapping
    fn fetch(&self, window: &ResolvedWindow) -> AttendanceMap;

    /// Whether any record falls inside the window
    fn has_any(&self, window: &ResolvedWindow) -> bool;

    /// Date of the most recent record anywhere, if one exists
    fn most_recent_date(&self) -> Option<NaiveDate>;
}

/// One student's logbook: configuration plus logged school days
#[derive(Debug, Clone)]
pub struct Logbook {
    /// The student this logbook tracks
    pub student: Student,
    /// Accountability association, when the family belongs to one
    pub association: Option<Association>,
    records: Vec<AttendanceRecord>,
}

impl Logbook {
    /// Create an empty logbook for a student
    #[must_use]
    pub const fn new(student: Student) -> Self {
        Self {
            student,
            association: None,
            records: Vec::new(),
        }
    }

    /// Add a logged school day.
    ///
    /// # Errors
    /// Returns an error if a record for the same date already exists; one
    /// student logs at most one school day per calendar date.
    pub fn add_record(&mut self, record: AttendanceRecord) -> Result<(), String> {
        if self.records.iter().any(|r| r.date == record.date) {
            return Err(format!(
                "Duplicate school day: {} is already logged for {}",
                record.date, self.student.name
            ));
        }
        self.records.push(record);
        Ok(())
    }

    /// All records, in insertion order
    #[must_use]
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Number of logged school days
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no school days are logged
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Day requirement for this logbook: the association's requirement when
    /// the family belongs to one, otherwise the supplied default
    #[must_use]
    pub fn required_days(&self, default: u32) -> u32 {
        self.association
            .as_ref()
            .map_or(default, |a| a.required_days)
    }

    /// Display name of the association, when present
    #[must_use]
    pub fn association_name(&self) -> Option<&str> {
        self.association.as_ref().map(|a| a.name.as_str())
    }
}

impl AttendanceSource for Logbook {
    fn fetch(&self, window: &ResolvedWindow) -> AttendanceMap {
        self.records
            .iter()
            .filter(|r| window.contains(r.date))
            .map(|r| (r.date, r.subjects.clone()))
            .collect()
    }

    fn has_any(&self, window: &ResolvedWindow) -> bool {
        self.records.iter().any(|r| window.contains(r.date))
    }

    fn most_recent_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }
}
