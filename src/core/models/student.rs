//! Student model

use super::AcademicYearConfig;
use serde::{Deserialize, Serialize};

/// Subjects expected of elementary students (Kindergarten through 6th grade)
const ELEMENTARY_SUBJECTS: [&str; 5] = ["Reading", "Writing", "Math", "Science", "Social Studies"];

/// Subjects expected of secondary students (7th through 12th grade)
const SECONDARY_SUBJECTS: [&str; 5] = [
    "Literature",
    "Composition",
    "Math",
    "Science",
    "Social Studies",
];

/// Grade markers that select the secondary subject list
const SECONDARY_GRADES: [&str; 6] = ["7th", "8th", "9th", "10th", "11th", "12th"];

/// Represents one student being tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student display name (e.g., "Eliza Day")
    pub name: String,

    /// Grade level label (e.g., "4th Grade", "Kindergarten")
    pub grade_level: String,

    /// Free-form grade label used instead of `grade_level` when present
    pub custom_grade_level: Option<String>,

    /// Subjects configured for this student beyond the grade defaults
    pub subjects: Vec<String>,

    /// Month boundaries of this student's academic year
    pub year: AcademicYearConfig,
}

impl Student {
    /// Create a new student with an empty subject list and the default
    /// academic year months
    #[must_use]
    pub fn new(name: String, grade_level: String) -> Self {
        Self {
            name,
            grade_level,
            custom_grade_level: None,
            subjects: Vec::new(),
            year: AcademicYearConfig::default(),
        }
    }

    /// Grade label for display: the custom label wins when set
    #[must_use]
    pub fn grade_label(&self) -> &str {
        self.custom_grade_level
            .as_deref()
            .unwrap_or(&self.grade_level)
    }

    /// Subjects required for this student's grade level.
    ///
    /// Grades 7th-12th get the secondary list (Literature, Composition, ...);
    /// everything else, including Kindergarten and unrecognized labels, gets
    /// the elementary list. A custom grade level suppresses defaults entirely,
    /// since the grade band can't be inferred from a free-form label.
    #[must_use]
    pub fn required_subjects(&self) -> Vec<String> {
        if self.custom_grade_level.is_some() {
            return Vec::new();
        }

        let grade = self.grade_level.to_lowercase();
        let is_secondary = SECONDARY_GRADES.iter().any(|g| grade.contains(g));

        let defaults = if is_secondary {
            SECONDARY_SUBJECTS
        } else {
            ELEMENTARY_SUBJECTS
        };
        defaults.iter().map(ToString::to_string).collect()
    }

    /// All subjects for this student: configured subjects merged with the
    /// grade-level defaults, sorted and deduplicated
    #[must_use]
    pub fn all_subjects(&self) -> Vec<String> {
        let mut merged: Vec<String> = self.subjects.clone();
        merged.extend(self.required_subjects());
        merged.sort();
        merged.dedup();
        merged
    }

    /// Slugified student name for use in report filenames.
    ///
    /// Lowercases the name and joins alphanumeric runs with single hyphens,
    /// so "Eliza Day" becomes "eliza-day".
    #[must_use]
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.name.len());
        let mut pending_separator = false;

        for c in self.name.chars() {
            if c.is_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                for lower in c.to_lowercase() {
                    slug.push(lower);
                }
            } else {
                pending_separator = true;
            }
        }

        slug
    }
}
