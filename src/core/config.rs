//! Configuration module for `HsLedger`

use crate::core::models::association::DEFAULT_REQUIRED_DAYS;
use crate::core::models::AcademicYearConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for generated compliance reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Compliance defaults applied when a logbook doesn't say otherwise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Instructional days required per academic year
    #[serde(default)]
    pub required_days: u32,
    /// Default first month of the academic year (1-12)
    #[serde(default)]
    pub start_month: u32,
    /// Default last month of the academic year (1-12)
    #[serde(default)]
    pub end_month: u32,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Compliance defaults
    #[serde(default)]
    pub compliance: ComplianceConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override the default day requirement
    pub required_days: Option<u32>,
}

impl Config {
    /// Get the `$HS_LEDGER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/hsledger`
    /// - macOS: `~/Library/Application Support/hsledger`
    /// - Windows: `%APPDATA%\hsledger`
    #[must_use]
    pub fn get_hsledger_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hsledger")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading configuration so that fields added in newer versions
    /// pick up their defaults. String fields merge when empty, numeric fields
    /// when zero (no compliance value is legitimately zero).
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        if self.compliance.required_days == 0 && defaults.compliance.required_days != 0 {
            self.compliance.required_days = defaults.compliance.required_days;
            changed = true;
        }
        if self.compliance.start_month == 0 && defaults.compliance.start_month != 0 {
            self.compliance.start_month = defaults.compliance.start_month;
            changed = true;
        }
        if self.compliance.end_month == 0 && defaults.compliance.end_month != 0 {
            self.compliance.end_month = defaults.compliance.end_month;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Command-line arguments override configuration file values for this run
    /// without modifying the persistent configuration file. Only non-`None`
    /// values in the overrides struct replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(required_days) = overrides.required_days {
            self.compliance.required_days = required_days;
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_hsledger_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$HS_LEDGER` variable in a string
    ///
    /// Replaces occurrences of `$HS_LEDGER` with the actual hsledger
    /// directory path, so configured paths can reference it.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$HS_LEDGER") {
            let hsledger_dir = Self::get_hsledger_dir();
            value.replace("$HS_LEDGER", hsledger_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands any `$HS_LEDGER`
    /// variables in the values. Missing fields use their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in config values
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Loads the compiled-in default configuration bundled with the binary.
    /// The defaults differ between debug and release builds.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. This
    /// should never happen in practice since the defaults are compiled into
    /// the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults, and saves the updated config.
    /// - If it doesn't (first run): creates the config directory, saves the
    ///   defaults, and returns them.
    ///
    /// Falls back to defaults if any error occurs during loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults

            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }

            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// Serializes the current configuration to TOML and writes it to the
    /// platform-specific config file, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Default academic-year months from the compliance section
    #[must_use]
    pub const fn default_year(&self) -> AcademicYearConfig {
        AcademicYearConfig::new(self.compliance.start_month, self.compliance.end_month)
    }

    /// Default day requirement, falling back to the built-in 180 when the
    /// config value is unset
    #[must_use]
    pub const fn default_required_days(&self) -> u32 {
        if self.compliance.required_days == 0 {
            DEFAULT_REQUIRED_DAYS
        } else {
            self.compliance.required_days
        }
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `reports_dir`: Reports output directory path
    /// - `required_days`: Default day requirement per academic year
    /// - `start_month`: Default academic year start month
    /// - `end_month`: Default academic year end month
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "required_days" | "required-days" => Some(self.compliance.required_days.to_string()),
            "start_month" | "start-month" => Some(self.compliance.start_month.to_string()),
            "end_month" | "end-month" => Some(self.compliance.end_month.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// The value is validated and converted to the appropriate type. Month
    /// keys must parse to 1-12; `required_days` must parse to a positive
    /// integer. This updates the in-memory config; call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "required_days" | "required-days" => {
                let days = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid value for 'required_days': '{value}'"))?;
                if days == 0 {
                    return Err("'required_days' must be at least 1".to_string());
                }
                self.compliance.required_days = days;
            }
            "start_month" | "start-month" => {
                self.compliance.start_month = parse_month_value(key, value)?;
            }
            "end_month" | "end-month" => {
                self.compliance.end_month = parse_month_value(key, value)?;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Resets a single configuration value to its default without losing
    /// other customizations. This updates the in-memory config; call
    /// [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "required_days" | "required-days" => {
                self.compliance.required_days = defaults.compliance.required_days;
            }
            "start_month" | "start-month" => {
                self.compliance.start_month = defaults.compliance.start_month;
            }
            "end_month" | "end-month" => {
                self.compliance.end_month = defaults.compliance.end_month;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, causing the next
    /// [`load()`](Config::load) to recreate it from defaults. Destructive;
    /// the CLI asks for confirmation first. Succeeds silently if the file
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

/// Parse a month config value, keeping the key name in the error
fn parse_month_value(key: &str, value: &str) -> Result<u32, String> {
    let month = value
        .parse::<u32>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))?;
    if !(1..=12).contains(&month) {
        return Err(format!("'{key}' must be a month from 1 to 12, got {month}"));
    }
    Ok(month)
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[compliance]")?;
        writeln!(f, "  required_days = {}", self.compliance.required_days)?;
        writeln!(f, "  start_month = {}", self.compliance.start_month)?;
        writeln!(f, "  end_month = {}", self.compliance.end_month)?;

        Ok(())
    }
}
