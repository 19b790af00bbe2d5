//! Serialized views of a parsed recipe
//!
//! `recipebox show` prints a recipe after defaults have been applied, so the
//! effective options of every block are visible.

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::recipe::Recipe;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML format (same shape as recipe files)
    #[default]
    Yaml,
    /// JSON format (machine-readable)
    Json,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_recipe(&self, recipe: &Recipe) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(recipe).context("Failed to serialize recipe to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(recipe).context("Failed to serialize recipe to YAML")
            }
        }
    }
}
