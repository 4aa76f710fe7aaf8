//! Integration tests for configuration management

use hs_ledger::config::{Config, ConfigOverrides};

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    // Should have non-empty defaults for critical fields
    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert_eq!(config.compliance.required_days, 180);
    assert_eq!(config.compliance.start_month, 8);
    assert_eq!(config.compliance.end_month, 7);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
reports_dir = "./reports"

[compliance]
required_days = 160
start_month = 9
end_month = 5
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.compliance.required_days, 160);
    assert_eq!(config.compliance.start_month, 9);
    assert_eq!(config.compliance.end_month, 5);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing fields within sections use serde defaults
    let toml_str = r#"
[logging]
level = "error"

[paths]

[compliance]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, ""); // Default empty
    assert!(!config.logging.verbose); // Default false
    assert_eq!(config.compliance.required_days, 0); // Default zero, merged later
}

#[test]
fn test_merge_defaults_fills_missing_fields() {
    let mut config = Config::from_toml("[logging]\nlevel = \"error\"\n").expect("parse");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);
    assert!(changed);

    // Explicit value preserved, missing values merged in
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.compliance.required_days, 180);
    assert_eq!(config.compliance.start_month, 8);
    assert_eq!(config.compliance.end_month, 7);

    // Second merge is a no-op
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_apply_overrides() {
    let mut config = Config::from_defaults();
    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        file: Some("/tmp/override.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("/tmp/reports".to_string()),
        required_days: Some(150),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, "/tmp/override.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "/tmp/reports");
    assert_eq!(config.compliance.required_days, 150);
}

#[test]
fn test_apply_empty_overrides_changes_nothing() {
    let mut config = Config::from_defaults();
    let before = config.to_string();

    config.apply_overrides(&ConfigOverrides::default());
    assert_eq!(config.to_string(), before);
}

#[test]
fn test_get_and_set_round_trip() {
    let mut config = Config::from_defaults();

    config.set("level", "warn").expect("set level");
    assert_eq!(config.get("level"), Some("warn".to_string()));

    config.set("required_days", "160").expect("set days");
    assert_eq!(config.get("required_days"), Some("160".to_string()));

    config.set("start_month", "9").expect("set start month");
    config.set("end_month", "5").expect("set end month");
    assert_eq!(config.get("start_month"), Some("9".to_string()));
    assert_eq!(config.get("end_month"), Some("5".to_string()));

    // Hyphenated key aliases work too
    assert_eq!(config.get("required-days"), Some("160".to_string()));
}

#[test]
fn test_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("required_days", "many").is_err());
    assert!(config.set("required_days", "0").is_err());
    assert!(config.set("start_month", "13").is_err());
    assert!(config.set("end_month", "0").is_err());
    assert!(config.set("nonexistent", "value").is_err());
}

#[test]
fn test_unset_restores_defaults() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("required_days", "90").expect("set days");
    config.unset("required_days", &defaults).expect("unset");
    assert_eq!(config.compliance.required_days, 180);

    assert!(config.unset("nonexistent", &defaults).is_err());
}

#[test]
fn test_default_year_and_required_days_helpers() {
    let config = Config::from_defaults();

    let year = config.default_year();
    assert_eq!(year.start_month, 8);
    assert_eq!(year.end_month, 7);
    assert_eq!(config.default_required_days(), 180);

    // Zero required_days falls back to the built-in 180
    let bare = Config::from_toml("[logging]\n").expect("parse");
    assert_eq!(bare.default_required_days(), 180);
}
