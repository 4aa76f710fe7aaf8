//! Data models for `HsLedger`

pub mod association;
pub mod attendance;
pub mod student;
pub mod year;

pub use association::Association;
pub use attendance::{AttendanceMap, AttendanceRecord};
pub use student::Student;
pub use year::AcademicYearConfig;
