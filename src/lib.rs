//! recipebox - composable building blocks for HPC container recipes
//!
//! A recipe is an ordered list of renderable instructions. Leaf primitives
//! wrap a single container directive, capabilities generate individual shell
//! steps, and building blocks such as [`blocks::OpenMpi`] compose those steps
//! into a complete download, configure, build and install lifecycle.
//!
//! Every renderable produces text for either Docker or Singularity. Unsupported
//! formats render as an empty string and log a single diagnostic.
//!
//! # Example Usage
//!
//! ```
//! use recipebox::blocks::{OpenMpi, OpenMpiConfig};
//! use recipebox::primitives::BaseImage;
//! use recipebox::{ContainerFormat, InstructionList, Renderable};
//!
//! let recipe = InstructionList::new()
//!     .with(BaseImage::new("ubuntu:22.04"))
//!     .with(OpenMpi::new(OpenMpiConfig::default()));
//!
//! let dockerfile = recipe.render(&ContainerFormat::Docker).unwrap();
//! assert!(dockerfile.starts_with("FROM ubuntu:22.04"));
//! ```
//!
//! # Project Structure
//!
//! - [`render`]: the [`Renderable`] contract and instruction lists
//! - [`primitives`]: single-directive renderables (base image, copy, env, ...)
//! - [`capability`]: shell step generators (wget, tar, git, configure/make, packages)
//! - [`blocks`]: composite building blocks
//! - [`recipe`]: YAML recipe files assembled into instruction lists

pub mod blocks;
pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod primitives;
pub mod recipe;
pub mod render;
pub mod toolchain;
pub mod util;

pub use blocks::{OpenMpi, OpenMpiConfig, Version};
pub use config::{ConfigError, RecipeboxConfig};
pub use error::{BlockError, RecipeError};
pub use format::ContainerFormat;
pub use recipe::{BlockSpec, Recipe, StageSpec};
pub use render::{InstructionList, Renderable};
pub use toolchain::Toolchain;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_recipebox() {
        assert_eq!(NAME, "recipebox");
    }
}
