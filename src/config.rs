//! Configuration management for the `Hazardwatch` engine
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::HazardwatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Hazardwatch` engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardwatchConfig {
    /// Proximity/debounce engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Report backend settings
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Proximity and debounce settings for the alert engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Radius around the user within which a report is a candidate, in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,
    /// Maximum age of a report still eligible for alerting, in hours
    #[serde(default = "default_recency_window_hours")]
    pub recency_window_hours: u32,
    /// Minimum time between repeated announcements, in seconds
    #[serde(default = "default_repeat_interval_secs")]
    pub repeat_interval_secs: u32,
    /// Distance below which two positions count as the same spot, in meters
    #[serde(default = "default_stationary_epsilon_meters")]
    pub stationary_epsilon_meters: f64,
}

/// Report backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Base URL of the report backend
    #[serde(default = "default_reports_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_reports_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_radius_meters() -> f64 {
    1000.0
}

fn default_recency_window_hours() -> u32 {
    12
}

fn default_repeat_interval_secs() -> u32 {
    120
}

fn default_stationary_epsilon_meters() -> f64 {
    60.0
}

fn default_reports_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_reports_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
            recency_window_hours: default_recency_window_hours(),
            repeat_interval_secs: default_repeat_interval_secs(),
            stationary_epsilon_meters: default_stationary_epsilon_meters(),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            base_url: default_reports_base_url(),
            timeout_seconds: default_reports_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for HazardwatchConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            reports: ReportsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl HazardwatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config/default.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with HAZARDWATCH_ prefix;
        // "__" separates nesting levels so section keys can contain "_"
        builder = builder.add_source(
            Environment::with_prefix("HAZARDWATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: HazardwatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hazardwatch").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.engine.radius_meters <= 0.0 {
            self.engine.radius_meters = default_radius_meters();
        }
        if self.engine.recency_window_hours == 0 {
            self.engine.recency_window_hours = default_recency_window_hours();
        }
        if self.engine.repeat_interval_secs == 0 {
            self.engine.repeat_interval_secs = default_repeat_interval_secs();
        }
        if self.engine.stationary_epsilon_meters <= 0.0 {
            self.engine.stationary_epsilon_meters = default_stationary_epsilon_meters();
        }
        if self.reports.base_url.is_empty() {
            self.reports.base_url = default_reports_base_url();
        }
        if self.reports.timeout_seconds == 0 {
            self.reports.timeout_seconds = default_reports_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.engine.radius_meters > 50_000.0 {
            return Err(
                HazardwatchError::config("Alert radius cannot exceed 50000 meters").into(),
            );
        }

        if self.engine.recency_window_hours > 168 {
            return Err(HazardwatchError::config(
                "Recency window cannot exceed 168 hours (1 week)",
            )
            .into());
        }

        if self.engine.repeat_interval_secs > 86_400 {
            return Err(HazardwatchError::config(
                "Repeat interval cannot exceed 86400 seconds (1 day)",
            )
            .into());
        }

        if self.engine.stationary_epsilon_meters >= self.engine.radius_meters {
            return Err(HazardwatchError::config(
                "Stationary epsilon must be smaller than the alert radius",
            )
            .into());
        }

        if self.reports.timeout_seconds > 300 {
            return Err(HazardwatchError::config(
                "Report fetch timeout cannot exceed 300 seconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HazardwatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HazardwatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.reports.base_url.starts_with("http://")
            && !self.reports.base_url.starts_with("https://")
        {
            return Err(HazardwatchError::config(
                "Report backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
