//! Academic-year window resolution
//!
//! Turns a student's configured start/end months plus a reference point into
//! the concrete calendar interval treated as "one year" of instruction. The
//! same computation used to be repeated inline at every report entry point;
//! it lives here once, parameterized by the attendance collaborator so the
//! fallback can anchor on real data.

use crate::core::logbook::AttendanceSource;
use crate::core::models::AcademicYearConfig;
use chrono::{Datelike, NaiveDate};

/// What anchors the window computation: a reference date (normally today),
/// or a start year the caller chose explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearAnchor {
    /// Detect the academic year containing this date, with data fallback
    Auto(NaiveDate),
    /// Use this start year directly; no detection, no fallback
    Explicit(i32),
}

/// A resolved academic-year window.
///
/// `start` is always the first day of the configured start month and `end`
/// the last calendar day of the configured end month, so `start <= end`
/// holds for every valid month configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWindow {
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window (last calendar day of the end month)
    pub end: NaiveDate,
    /// Display label: `"2024"` for a same-year window, else `"2023-2024"`
    pub label: String,
}

impl ResolvedWindow {
    /// Whether a date falls inside the window (inclusive on both ends)
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Last calendar day of a month, leap-year aware.
///
/// # Errors
/// Returns an error if the month is outside 1-12.
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, String> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .ok_or_else(|| format!("Month {month} of year {year} has no last day (expected 1-12)"))
}

/// Determine the start year of the academic year containing `reference`.
///
/// Non-wrapping configurations use the reference's own year. Wrapping
/// configurations pick the year so that the window contains the reference:
/// a reference at or past the start month is in the first half, a reference
/// at or before the end month is in the second half. A reference in the gap
/// between the two (only possible when `start_month > end_month + 1`) is
/// treated as the first half, so the window opens at the reference's year.
fn start_year_for(config: &AcademicYearConfig, reference: NaiveDate) -> i32 {
    if !config.is_wrapping() {
        return reference.year();
    }

    if reference.month() >= config.start_month {
        reference.year()
    } else if reference.month() <= config.end_month {
        reference.year() - 1
    } else {
        // Gap month: nearest-start rule, same outcome as the first-half branch
        reference.year()
    }
}

/// Build the concrete window for a given start year.
///
/// # Errors
/// Returns an error if either configured month is outside 1-12.
pub fn window_for(config: &AcademicYearConfig, start_year: i32) -> Result<ResolvedWindow, String> {
    config.validate()?;

    let end_year = if config.is_wrapping() {
        start_year + 1
    } else {
        start_year
    };

    let start = NaiveDate::from_ymd_opt(start_year, config.start_month, 1)
        .ok_or_else(|| format!("Invalid window start {start_year}-{:02}", config.start_month))?;
    let end_day = last_day_of_month(end_year, config.end_month)?;
    let end = NaiveDate::from_ymd_opt(end_year, config.end_month, end_day)
        .ok_or_else(|| format!("Invalid window end {end_year}-{:02}", config.end_month))?;

    let label = if start_year == end_year {
        format!("{start_year}")
    } else {
        format!("{start_year}-{end_year}")
    };

    Ok(ResolvedWindow { start, end, label })
}

/// Resolve the academic-year window for a student.
///
/// With an [`YearAnchor::Explicit`] year the window is computed directly and
/// the attendance source is never consulted; the caller chose the year, so an
/// empty window is what they asked for. With [`YearAnchor::Auto`], the window
/// containing the reference date is computed first; if the source has no
/// records in it, the window is re-anchored on the most recent record
/// anywhere, keeping the configured month span and shifting only the years.
/// A student with no records at all keeps the original (empty) window.
///
/// # Errors
/// Returns an error if either configured month is outside 1-12.
pub fn resolve_window<S: AttendanceSource + ?Sized>(
    config: &AcademicYearConfig,
    anchor: YearAnchor,
    source: &S,
) -> Result<ResolvedWindow, String> {
    match anchor {
        YearAnchor::Explicit(start_year) => window_for(config, start_year),
        YearAnchor::Auto(reference) => {
            let window = window_for(config, start_year_for(config, reference))?;
            if source.has_any(&window) {
                return Ok(window);
            }

            match source.most_recent_date() {
                Some(last_logged) => window_for(config, start_year_for(config, last_logged)),
                None => Ok(window),
            }
        }
    }
}
