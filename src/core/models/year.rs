//! Academic year month configuration

use serde::{Deserialize, Serialize};

/// Configured month boundaries of a student's academic year.
///
/// Both months are 1-based calendar months. A wrapping configuration
/// (`start_month > end_month`, e.g. August through July) spans two calendar
/// years; `start_month == end_month` resolves to that single month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicYearConfig {
    /// First month of the academic year (1-12)
    pub start_month: u32,
    /// Last month of the academic year (1-12)
    pub end_month: u32,
}

impl Default for AcademicYearConfig {
    /// August through July, the most common homeschool reporting year
    fn default() -> Self {
        Self {
            start_month: 8,
            end_month: 7,
        }
    }
}

impl AcademicYearConfig {
    /// Create a new month configuration
    #[must_use]
    pub const fn new(start_month: u32, end_month: u32) -> Self {
        Self {
            start_month,
            end_month,
        }
    }

    /// Whether the academic year spans two calendar years
    #[must_use]
    pub const fn is_wrapping(&self) -> bool {
        self.start_month > self.end_month
    }

    /// Check that both months are within 1-12.
    ///
    /// Month values are normally validated where they enter the system (the
    /// logbook parser, the config loader), but window computation checks
    /// again rather than build nonsense dates.
    ///
    /// # Errors
    /// Returns an error naming the out-of-range month.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.start_month) {
            return Err(format!(
                "Academic year start month {} is out of range (expected 1-12)",
                self.start_month
            ));
        }
        if !(1..=12).contains(&self.end_month) {
            return Err(format!(
                "Academic year end month {} is out of range (expected 1-12)",
                self.end_month
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_august_to_july() {
        let config = AcademicYearConfig::default();
        assert_eq!(config.start_month, 8);
        assert_eq!(config.end_month, 7);
        assert!(config.is_wrapping());
    }

    #[test]
    fn calendar_year_is_not_wrapping() {
        let config = AcademicYearConfig::new(1, 12);
        assert!(!config.is_wrapping());
    }

    #[test]
    fn same_month_is_not_wrapping() {
        let config = AcademicYearConfig::new(9, 9);
        assert!(!config.is_wrapping());
    }

    #[test]
    fn validate_rejects_out_of_range_months() {
        assert!(AcademicYearConfig::new(0, 7).validate().is_err());
        assert!(AcademicYearConfig::new(8, 13).validate().is_err());
        assert!(AcademicYearConfig::new(8, 7).validate().is_ok());
    }
}
