use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::Renderable;
use tracing::warn;

pub const DEFAULT_IMAGE: &str = "nvidia/cuda:9.0-devel-ubuntu16.04";

/// The image a stage starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    image: String,
    stage: Option<String>,
    index: Option<usize>,
}

impl Default for BaseImage {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE)
    }
}

impl BaseImage {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            stage: None,
            index: None,
        }
    }

    /// Names the stage so later stages can copy from it.
    pub fn named(mut self, stage: impl Into<String>) -> Self {
        let stage = stage.into();
        self.stage = (!stage.is_empty()).then_some(stage);
        self
    }

    /// Marks an unnamed stage that later stages copy from by position.
    /// Docker addresses stages by index natively; Singularity needs the
    /// index written out as the stage name.
    pub fn indexed(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Renderable for BaseImage {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "base image") {
            return Ok(String::new());
        }

        if self.image.is_empty() {
            warn!("base image name is empty");
            return Ok(String::new());
        }

        Ok(match (format, &self.stage) {
            (ContainerFormat::Docker, Some(stage)) => format!("FROM {} AS {}", self.image, stage),
            (ContainerFormat::Docker, None) => format!("FROM {}", self.image),
            (ContainerFormat::Singularity, Some(stage)) => {
                format!("BootStrap: docker\nFrom: {}\nStage: {}", self.image, stage)
            }
            (ContainerFormat::Singularity, None) => match self.index {
                Some(index) => {
                    format!("BootStrap: docker\nFrom: {}\nStage: {}", self.image, index)
                }
                None => format!("BootStrap: docker\nFrom: {}", self.image),
            },
            (ContainerFormat::Custom(_), _) => String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_image() {
        let b = BaseImage::default();
        assert_ne!(b.render(&ContainerFormat::Docker).unwrap(), "");
        assert_ne!(b.render(&ContainerFormat::Singularity).unwrap(), "");
    }

    #[test]
    fn test_invalid_format() {
        let b = BaseImage::default();
        assert_eq!(
            b.render(&ContainerFormat::Custom(String::new())).unwrap(),
            ""
        );
    }

    #[test]
    fn test_value() {
        let b = BaseImage::new("foo");
        assert_eq!(b.render(&ContainerFormat::Docker).unwrap(), "FROM foo");
        assert_eq!(
            b.render(&ContainerFormat::Singularity).unwrap(),
            "BootStrap: docker\nFrom: foo"
        );
    }

    #[test]
    fn test_named_stage() {
        let b = BaseImage::new("foo").named("dev");
        assert_eq!(b.render(&ContainerFormat::Docker).unwrap(), "FROM foo AS dev");
        assert_eq!(
            b.render(&ContainerFormat::Singularity).unwrap(),
            "BootStrap: docker\nFrom: foo\nStage: dev"
        );
    }

    #[test]
    fn test_indexed_stage_is_named_only_in_singularity() {
        let b = BaseImage::new("foo").indexed(0);
        assert_eq!(b.render(&ContainerFormat::Docker).unwrap(), "FROM foo");
        assert_eq!(
            b.render(&ContainerFormat::Singularity).unwrap(),
            "BootStrap: docker\nFrom: foo\nStage: 0"
        );
    }

    #[test]
    fn test_name_wins_over_index() {
        let b = BaseImage::new("foo").named("dev").indexed(2);
        assert_eq!(
            b.render(&ContainerFormat::Singularity).unwrap(),
            "BootStrap: docker\nFrom: foo\nStage: dev"
        );
    }
}
