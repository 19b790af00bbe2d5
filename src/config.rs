//! Runtime configuration for recipebox
//!
//! Settings are read from environment variables with defaults; command-line
//! flags override them.
//!
//! # Environment Variables
//!
//! - `RECIPEBOX_FORMAT`: Output format (docker|singularity) - default: "docker"
//! - `RECIPEBOX_LOG_LEVEL`: Logging level - default: "info"
//! - `RECIPEBOX_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `RECIPEBOX_SKIP_FAILED`: Skip blocks whose configuration is invalid
//!   instead of aborting (true|false) - default: "false"

use crate::format::ContainerFormat;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_FORMAT: &str = "docker";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SKIP_FAILED: bool = false;
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported output format: {0}. Valid options: docker, singularity")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeboxConfig {
    pub format: ContainerFormat,
    pub log_level: String,
    pub skip_failed: bool,
}

impl Default for RecipeboxConfig {
    fn default() -> Self {
        let format = env::var("RECIPEBOX_FORMAT")
            .map(|s| ContainerFormat::parse_lenient(s.trim()))
            .unwrap_or_else(|_| ContainerFormat::parse_lenient(DEFAULT_FORMAT));

        let log_level = env::var("RECIPEBOX_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let skip_failed = env::var("RECIPEBOX_SKIP_FAILED")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_SKIP_FAILED);

        Self {
            format,
            log_level,
            skip_failed,
        }
    }
}

impl RecipeboxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.format.is_supported() {
            return Err(ConfigError::UnsupportedFormat(self.format.name()));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl fmt::Display for RecipeboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipebox Configuration:")?;
        writeln!(f, "  Format: {}", self.format)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        write!(f, "  Skip Failed Blocks: {}", self.skip_failed)
    }
}
