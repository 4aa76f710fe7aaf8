//! Core module for attendance record-keeping and compliance reporting

pub mod config;
pub mod logbook;
pub mod matrix;
pub mod models;
pub mod report;
pub mod window;

/// Returns the current version of the `HsLedger` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
