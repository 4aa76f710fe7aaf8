//! Attendance record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-ordered mapping from school day to the subject display names worked
/// that day. This is the shape one report computation runs over; it is built
/// fresh per request and never mutated afterward.
pub type AttendanceMap = BTreeMap<NaiveDate, Vec<String>>;

/// One logged school day for a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Calendar date of the school day
    pub date: NaiveDate,
    /// Subjects worked on that day (display names)
    pub subjects: Vec<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Create a record with no subjects or notes
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            subjects: Vec::new(),
            notes: None,
        }
    }

    /// Create a record with subjects
    #[must_use]
    pub const fn with_subjects(date: NaiveDate, subjects: Vec<String>) -> Self {
        Self {
            date,
            subjects,
            notes: None,
        }
    }
}
