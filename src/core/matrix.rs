//! Attendance matrix and compliance tallies
//!
//! Transforms the sparse per-date attendance mapping for a resolved window
//! into the dense month-by-day grid a compliance record prints: one row per
//! calendar month, 31 day cells each, with per-month and total attended
//! counts, days remaining against the requirement, and a per-subject tally.

use crate::core::models::AttendanceMap;
use crate::core::window::ResolvedWindow;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Display names of the calendar months, indexed by month number - 1
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of day cells in every month row
pub const DAYS_PER_ROW: usize = 31;

/// Status of one day position in a month row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Day position exceeds the month's length (e.g. day 31 of September)
    Invalid,
    /// A school day was logged on this date
    Attended,
    /// Valid calendar day with nothing logged
    Empty,
}

/// One calendar month of the attendance grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    /// Month display name (e.g., "September")
    pub name: &'static str,
    /// Calendar year this row belongs to
    pub year: i32,
    /// Exactly 31 day cells; positions past the month length are `Invalid`
    pub days: Vec<DayCell>,
    /// Number of `Attended` cells in this row
    pub total_attended: u32,
}

/// Compliance data for one student over one academic-year window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceReport {
    /// Month rows from the window's first month through its last, in order
    pub months: Vec<MonthRow>,
    /// Distinct school days logged inside the window
    pub total_days: u32,
    /// Days still needed to meet the requirement (never negative)
    pub days_remaining: u32,
    /// Attended-day count per subject, sorted alphabetically by name
    pub subject_tally: Vec<(String, u32)>,
    /// The day requirement this report was computed against
    pub requirement: u32,
}

impl ComplianceReport {
    /// Whether the requirement has been met
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total_days >= self.requirement
    }

    /// Percentage of the requirement completed, capped at 100
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        if self.requirement == 0 {
            return 100;
        }
        (self.total_days * 100 / self.requirement).min(100)
    }
}

/// Build the compliance report for a window.
///
/// Records outside the window are ignored rather than rejected: the caller
/// normally pre-filters, but the builder does not assume it. An empty map is
/// fine and produces an all-empty grid.
///
/// # Errors
/// Returns an error if the window's start date is after its end date.
pub fn build_compliance_report(
    records: &AttendanceMap,
    window: &ResolvedWindow,
    requirement: u32,
) -> Result<ComplianceReport, String> {
    if window.start > window.end {
        return Err(format!(
            "Invalid window: start {} is after end {}",
            window.start, window.end
        ));
    }

    // Restrict to in-window dates once; everything below reads this map.
    let in_window: AttendanceMap = records
        .iter()
        .filter(|(date, _)| window.contains(**date))
        .map(|(date, subjects)| (*date, subjects.clone()))
        .collect();

    let months = build_month_rows(&in_window, window);

    let total_days = u32::try_from(in_window.len()).unwrap_or(u32::MAX);
    debug_assert_eq!(
        total_days,
        months.iter().map(|m| m.total_attended).sum::<u32>()
    );

    let days_remaining = requirement.saturating_sub(total_days);
    let subject_tally = tally_subjects(&in_window);

    Ok(ComplianceReport {
        months,
        total_days,
        days_remaining,
        subject_tally,
        requirement,
    })
}

/// Walk the window month by month and classify all 31 day positions
fn build_month_rows(records: &AttendanceMap, window: &ResolvedWindow) -> Vec<MonthRow> {
    let mut months = Vec::new();

    let mut year = window.start.year();
    let mut month = window.start.month();

    loop {
        months.push(build_month_row(records, year, month));

        if year == window.end.year() && month == window.end.month() {
            break;
        }
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }

    months
}

/// Classify the 31 day positions of a single month.
///
/// `from_ymd_opt` returning `None` is exactly the "day past month length"
/// case, leap Februaries included.
fn build_month_row(records: &AttendanceMap, year: i32, month: u32) -> MonthRow {
    let mut days = Vec::with_capacity(DAYS_PER_ROW);
    let mut total_attended = 0;

    for day in 1..=DAYS_PER_ROW as u32 {
        let cell = match NaiveDate::from_ymd_opt(year, month, day) {
            None => DayCell::Invalid,
            Some(date) if records.contains_key(&date) => {
                total_attended += 1;
                DayCell::Attended
            }
            Some(_) => DayCell::Empty,
        };
        days.push(cell);
    }

    MonthRow {
        name: MONTH_NAMES[(month - 1) as usize],
        year,
        days,
        total_attended,
    }
}

/// Count attended days per subject, alphabetically ordered.
///
/// A date with several subjects counts once toward each of them. The
/// `BTreeMap` accumulator gives the case-sensitive ordinal sort for free.
fn tally_subjects(records: &AttendanceMap) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    for subjects in records.values() {
        for subject in subjects {
            *counts.entry(subject.clone()).or_insert(0) += 1;
        }
    }

    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AcademicYearConfig;
    use crate::core::window::window_for;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn september_2024() -> ResolvedWindow {
        ResolvedWindow {
            start: date(2024, 9, 1),
            end: date(2024, 9, 30),
            label: "2024".to_string(),
        }
    }

    #[test]
    fn september_scenario() {
        let mut records = AttendanceMap::new();
        records.insert(
            date(2024, 9, 5),
            vec!["Math".to_string(), "Science".to_string()],
        );
        records.insert(date(2024, 9, 12), vec!["Math".to_string()]);

        let report =
            build_compliance_report(&records, &september_2024(), 180).expect("report");

        assert_eq!(report.total_days, 2);
        assert_eq!(report.days_remaining, 178);
        assert_eq!(
            report.subject_tally,
            vec![("Math".to_string(), 2), ("Science".to_string(), 1)]
        );

        assert_eq!(report.months.len(), 1);
        let september = &report.months[0];
        assert_eq!(september.name, "September");
        assert_eq!(september.year, 2024);
        assert_eq!(september.total_attended, 2);
        assert_eq!(september.days[4], DayCell::Attended); // the 5th
        assert_eq!(september.days[11], DayCell::Attended); // the 12th
        assert_eq!(september.days[0], DayCell::Empty);
        // September has 30 days, so only position 31 is invalid
        assert_eq!(september.days[30], DayCell::Invalid);
        let invalid = september
            .days
            .iter()
            .filter(|c| **c == DayCell::Invalid)
            .count();
        assert_eq!(invalid, 1);
    }

    #[test]
    fn empty_map_produces_empty_grid() {
        let records = AttendanceMap::new();
        let report =
            build_compliance_report(&records, &september_2024(), 180).expect("report");

        assert_eq!(report.total_days, 0);
        assert_eq!(report.days_remaining, 180);
        assert!(report.subject_tally.is_empty());
        assert!(report.months[0]
            .days
            .iter()
            .all(|c| *c != DayCell::Attended));
        assert!(!report.is_complete());
        assert_eq!(report.progress_percent(), 0);
    }

    #[test]
    fn out_of_range_dates_are_ignored() {
        let mut records = AttendanceMap::new();
        records.insert(date(2024, 9, 5), vec!["Math".to_string()]);
        records.insert(date(2024, 10, 1), vec!["Math".to_string()]);
        records.insert(date(2023, 12, 25), vec!["Art".to_string()]);

        let report =
            build_compliance_report(&records, &september_2024(), 180).expect("report");

        assert_eq!(report.total_days, 1);
        assert_eq!(report.subject_tally, vec![("Math".to_string(), 1)]);
    }

    #[test]
    fn rejects_inverted_window() {
        let window = ResolvedWindow {
            start: date(2024, 9, 30),
            end: date(2024, 9, 1),
            label: "2024".to_string(),
        };

        let err = build_compliance_report(&AttendanceMap::new(), &window, 180)
            .expect_err("inverted window must fail");
        assert!(err.contains("Invalid window"));
    }

    #[test]
    fn month_totals_sum_to_total_days() {
        let config = AcademicYearConfig::new(8, 7);
        let window = window_for(&config, 2023).expect("window");

        let mut records = AttendanceMap::new();
        records.insert(date(2023, 8, 14), vec!["Math".to_string()]);
        records.insert(date(2023, 12, 1), vec![]);
        records.insert(date(2024, 2, 29), vec!["Science".to_string()]);
        records.insert(date(2024, 7, 31), vec!["Math".to_string()]);

        let report = build_compliance_report(&records, &window, 180).expect("report");

        assert_eq!(report.months.len(), 12);
        let summed: u32 = report.months.iter().map(|m| m.total_attended).sum();
        assert_eq!(summed, report.total_days);
        assert_eq!(report.total_days, 4);
    }

    #[test]
    fn invalid_cells_match_month_length() {
        let config = AcademicYearConfig::new(1, 12);
        let window = window_for(&config, 2024).expect("window");
        let report =
            build_compliance_report(&AttendanceMap::new(), &window, 180).expect("report");

        // 2024 is a leap year
        let expected_lengths = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (row, expected) in report.months.iter().zip(expected_lengths) {
            let invalid = row.days.iter().filter(|c| **c == DayCell::Invalid).count();
            assert_eq!(
                invalid,
                DAYS_PER_ROW - expected,
                "{} {} should have {} invalid cells",
                row.name,
                row.year,
                DAYS_PER_ROW - expected
            );
        }
    }

    #[test]
    fn december_rolls_into_january() {
        let window = ResolvedWindow {
            start: date(2023, 11, 1),
            end: date(2024, 2, 29),
            label: "2023-2024".to_string(),
        };
        let report =
            build_compliance_report(&AttendanceMap::new(), &window, 180).expect("report");

        let labels: Vec<(&str, i32)> = report.months.iter().map(|m| (m.name, m.year)).collect();
        assert_eq!(
            labels,
            vec![
                ("November", 2023),
                ("December", 2023),
                ("January", 2024),
                ("February", 2024)
            ]
        );
    }

    #[test]
    fn multi_subject_days_count_each_subject_once() {
        let mut records = AttendanceMap::new();
        records.insert(
            date(2024, 9, 5),
            vec!["Math".to_string(), "Math".to_string(), "Art".to_string()],
        );

        let report =
            build_compliance_report(&records, &september_2024(), 180).expect("report");

        // Duplicate names on one day still increment per listed entry;
        // the logbook parser deduplicates within a record before this point
        assert_eq!(
            report.subject_tally,
            vec![("Art".to_string(), 1), ("Math".to_string(), 2)]
        );
    }

    #[test]
    fn progress_percent_caps_at_100() {
        let mut records = AttendanceMap::new();
        records.insert(date(2024, 9, 5), vec![]);
        records.insert(date(2024, 9, 6), vec![]);
        records.insert(date(2024, 9, 9), vec![]);

        let report = build_compliance_report(&records, &september_2024(), 2).expect("report");
        assert!(report.is_complete());
        assert_eq!(report.progress_percent(), 100);
        assert_eq!(report.days_remaining, 0);
    }
}
