use crate::blocks::{OpenMpi, OpenMpiConfig};
use crate::capability::{PackageInstall, PackageManager};
use crate::primitives::{Comment, Copy, Environment, Raw, Workdir};
use crate::render::{Renderable, Shell};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// One building block as written in a recipe file, selected by its `block`
/// key. Keys a block does not know are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum BlockSpec {
    Openmpi(OpenMpiConfig),
    Packages {
        #[serde(default)]
        packages: Vec<String>,
        #[serde(default)]
        manager: PackageManager,
    },
    Shell {
        #[serde(default)]
        commands: Vec<String>,
    },
    Comment {
        #[serde(default)]
        text: String,
        #[serde(default = "default_true")]
        reformat: bool,
    },
    Copy {
        #[serde(default)]
        src: String,
        #[serde(default)]
        dest: String,
        #[serde(default)]
        from: Option<String>,
    },
    Environment {
        #[serde(default)]
        variables: BTreeMap<String, String>,
    },
    Workdir {
        #[serde(default)]
        directory: String,
    },
    Raw {
        #[serde(default)]
        docker: String,
        #[serde(default)]
        singularity: String,
    },
}

impl BlockSpec {
    /// Instantiates the block. Validation happens later, when it renders.
    pub fn build(&self) -> Box<dyn Renderable> {
        match self {
            BlockSpec::Openmpi(config) => Box::new(OpenMpi::new(config.clone())),
            BlockSpec::Packages { packages, manager } => {
                Box::new(PackageInstall::new(*manager, packages.iter().cloned()))
            }
            BlockSpec::Shell { commands } => Box::new(Shell::new(commands.iter().cloned())),
            BlockSpec::Comment { text, reformat } => {
                if *reformat {
                    Box::new(Comment::new(text.clone()))
                } else {
                    Box::new(Comment::verbatim(text.clone()))
                }
            }
            BlockSpec::Copy { src, dest, from } => {
                let copy = Copy::new(src.clone(), dest.clone());
                Box::new(match from {
                    Some(stage) => copy.from_stage(stage.clone()),
                    None => copy,
                })
            }
            BlockSpec::Environment { variables } => Box::new(Environment::new(variables.clone())),
            BlockSpec::Workdir { directory } => Box::new(Workdir::new(directory.clone())),
            BlockSpec::Raw {
                docker,
                singularity,
            } => Box::new(Raw::new(docker.clone(), singularity.clone())),
        }
    }
}
