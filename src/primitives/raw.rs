use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::Renderable;

/// Format-specific text passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raw {
    pub docker: String,
    pub singularity: String,
}

impl Raw {
    pub fn new(docker: impl Into<String>, singularity: impl Into<String>) -> Self {
        Self {
            docker: docker.into(),
            singularity: singularity.into(),
        }
    }
}

impl Renderable for Raw {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "raw") {
            return Ok(String::new());
        }
        Ok(match format {
            ContainerFormat::Docker => self.docker.clone(),
            ContainerFormat::Singularity => self.singularity.clone(),
            ContainerFormat::Custom(_) => String::new(),
        })
    }
}
