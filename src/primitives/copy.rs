use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::Renderable;
use tracing::warn;

/// Copies a file or directory into the image, optionally from an earlier
/// build stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Copy {
    src: String,
    dest: String,
    from: Option<String>,
}

impl Copy {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
            from: None,
        }
    }

    /// Copies out of the build stage named (or numbered) `stage`.
    pub fn from_stage(mut self, stage: impl Into<String>) -> Self {
        let stage = stage.into();
        self.from = (!stage.is_empty()).then_some(stage);
        self
    }
}

impl Renderable for Copy {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "copy") {
            return Ok(String::new());
        }

        if self.src.is_empty() || self.dest.is_empty() {
            warn!(src = %self.src, dest = %self.dest, "copy needs both a source and a destination");
            return Ok(String::new());
        }

        Ok(match (format, &self.from) {
            (ContainerFormat::Docker, Some(stage)) => {
                format!("COPY --from={} {} {}", stage, self.src, self.dest)
            }
            (ContainerFormat::Docker, None) => format!("COPY {} {}", self.src, self.dest),
            (ContainerFormat::Singularity, Some(stage)) => {
                format!("%files from {}\n    {} {}", stage, self.src, self.dest)
            }
            (ContainerFormat::Singularity, None) => {
                format!("%files\n    {} {}", self.src, self.dest)
            }
            (ContainerFormat::Custom(_), _) => String::new(),
        })
    }
}
