//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::mapper::{StickLayout, StickSide};
use crate::error::{Result, StickTyperError};
use crate::output::OutputMode;

/// Accepted values for `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Controller configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Empty means auto-detect.
    #[serde(default)]
    pub device_path: String,

    #[serde(default)]
    pub layout: StickLayout,

    #[serde(default)]
    pub row_stick: StickSide,

    #[serde(default = "default_edge_buffer")]
    pub edge_buffer: f64,
}

/// Output configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Empty disables the transcript.
    #[serde(default)]
    pub transcript_path: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_edge_buffer() -> f64 { 0.05 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
            layout: StickLayout::default(),
            row_stick: StickSide::default(),
            edge_buffer: default_edge_buffer(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            transcript_path: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stick_typer::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Configured device path, or `None` for auto-detection
    pub fn device_path(&self) -> Option<&str> {
        Some(self.controller.device_path.as_str()).filter(|path| !path.is_empty())
    }

    /// Configured transcript path, or `None` when disabled
    pub fn transcript_path(&self) -> Option<&str> {
        Some(self.output.transcript_path.as_str()).filter(|path| !path.is_empty())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        let buffer = self.controller.edge_buffer;
        // A zero buffer puts the threshold at the calibrated peak, which no
        // sample can exceed.
        if !buffer.is_finite() || buffer <= 0.0 || buffer >= 0.5 {
            return Err(StickTyperError::Config(
                toml::de::Error::custom("edge_buffer must be above 0.0 and below 0.5")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(StickTyperError::Config(
                toml::de::Error::custom(format!(
                    "logging level must be one of: {}",
                    LOG_LEVELS.join(", ")
                ))
            ));
        }

        Ok(())
    }
}
