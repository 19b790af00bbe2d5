use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while a building block computes its instructions.
///
/// Blocks record raw configuration at construction and validate it during
/// setup, so these errors surface from `render`, never from a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("Invalid version '{version}': expected MAJOR.MINOR[.PATCH]")]
    InvalidVersion { version: String },

    #[error("{block}: required option '{option}' is empty")]
    MissingOption { block: String, option: String },

    #[error("Instruction {index} failed to render: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<BlockError>,
    },
}

impl BlockError {
    pub fn missing_option(block: &str, option: &str) -> Self {
        BlockError::MissingOption {
            block: block.to_string(),
            option: option.to_string(),
        }
    }

    /// The innermost error, unwrapping instruction list positions.
    pub fn root_cause(&self) -> &BlockError {
        match self {
            BlockError::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Failures while loading or assembling a recipe file.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to read recipe {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse recipe: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Stage '{stage}' takes its runtime from unknown stage '{runtime_of}'")]
    UnknownStage { stage: String, runtime_of: String },

    #[error("Recipe has no stages")]
    Empty,
}
