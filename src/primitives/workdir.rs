use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::{render_commands, Renderable};
use tracing::warn;

/// Sets the working directory, creating it when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workdir {
    directory: String,
}

impl Workdir {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl Renderable for Workdir {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "workdir") {
            return Ok(String::new());
        }

        if self.directory.is_empty() {
            warn!("workdir needs a directory");
            return Ok(String::new());
        }

        Ok(match format {
            ContainerFormat::Docker => format!("WORKDIR {}", self.directory),
            _ => render_commands(
                &[
                    format!("mkdir -p {}", self.directory),
                    format!("cd {}", self.directory),
                ],
                format,
            ),
        })
    }
}
