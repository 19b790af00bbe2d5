//! Recipe files: stages of building blocks described in YAML.
//!
//! ```yaml
//! stages:
//!   - name: devel
//!     image: nvidia/cuda:9.0-devel-ubuntu16.04
//!     blocks:
//!       - block: openmpi
//!         version: 3.0.0
//!   - image: nvidia/cuda:9.0-runtime-ubuntu16.04
//!     runtime_of: devel
//! ```
//!
//! A stage with `runtime_of` receives the runtime instructions of every
//! block in the named earlier stage, ahead of its own blocks.

pub mod block_spec;

use crate::error::RecipeError;
use crate::primitives::BaseImage;
use crate::render::{InstructionList, Renderable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub use block_spec::BlockSpec;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageSpec {
    /// Stage name other stages refer to; defaults to the stage index.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub runtime_of: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub stages: Vec<StageSpec>,
}

impl Recipe {
    pub fn from_yaml(content: &str) -> Result<Self, RecipeError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let content = fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "Loaded recipe file");
        Self::from_yaml(&content)
    }

    /// Instantiates every stage and returns them as one instruction list.
    pub fn build(&self) -> Result<InstructionList, RecipeError> {
        if self.stages.is_empty() {
            return Err(RecipeError::Empty);
        }

        let referenced: HashSet<&str> = self
            .stages
            .iter()
            .filter_map(|stage| stage.runtime_of.as_deref())
            .collect();
        let mut built: Vec<(String, InstructionList)> = Vec::with_capacity(self.stages.len());

        for (index, stage) in self.stages.iter().enumerate() {
            let reference = stage.name.clone().unwrap_or_else(|| index.to_string());
            let mut list = InstructionList::new();

            if let Some(image) = &stage.image {
                let mut base = BaseImage::new(image.clone());
                match &stage.name {
                    Some(name) => base = base.named(name.clone()),
                    None if referenced.contains(reference.as_str()) => {
                        base = base.indexed(index)
                    }
                    None => {}
                }
                list.push(base);
            }

            if let Some(runtime_of) = &stage.runtime_of {
                let (from, source) = built
                    .iter()
                    .find(|(name, _)| name == runtime_of)
                    .ok_or_else(|| RecipeError::UnknownStage {
                        stage: reference.clone(),
                        runtime_of: runtime_of.clone(),
                    })?;
                list.append(source.runtime(from));
            }

            for block in &stage.blocks {
                list.push_boxed(block.build());
            }

            debug!(stage = %reference, instructions = list.len(), "Built stage");
            built.push((reference, list));
        }

        info!(stages = built.len(), "Recipe assembled");
        Ok(built.into_iter().map(|(_, list)| list).fold(
            InstructionList::new(),
            |recipe, stage| recipe.with(stage),
        ))
    }
}
