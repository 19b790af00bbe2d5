use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::Renderable;
use std::collections::BTreeMap;

/// Environment variables exported in the image.
///
/// Variables are emitted sorted by name so output does not depend on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    variables: BTreeMap<String, String>,
}

impl Environment {
    pub fn new<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

impl Renderable for Environment {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "environment") || self.variables.is_empty() {
            return Ok(String::new());
        }

        Ok(match format {
            ContainerFormat::Docker => {
                let pairs: Vec<String> = self
                    .variables
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                format!("ENV {}", pairs.join(" \\\n    "))
            }
            ContainerFormat::Singularity => {
                let exports: Vec<String> = self
                    .variables
                    .iter()
                    .map(|(k, v)| format!("export {}={}", k, v))
                    .collect();
                format!("%environment\n    {}", exports.join("\n    "))
            }
            ContainerFormat::Custom(_) => String::new(),
        })
    }
}
