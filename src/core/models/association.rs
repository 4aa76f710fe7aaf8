//! Homeschool association model

use serde::{Deserialize, Serialize};

/// Instructional days required per academic year when no association or
/// configuration says otherwise
pub const DEFAULT_REQUIRED_DAYS: u32 = 180;

/// A homeschool accountability association.
///
/// Associations set the day requirement their member families must log; the
/// association value overrides the configured default when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Association display name
    pub name: String,
    /// Instructional days this association requires per academic year
    pub required_days: u32,
}

impl Association {
    /// Create a new association
    #[must_use]
    pub const fn new(name: String, required_days: u32) -> Self {
        Self {
            name,
            required_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_carries_requirement() {
        let assoc = Association::new("Palmetto Homeschool Association".to_string(), 170);
        assert_eq!(assoc.required_days, 170);
    }
}
