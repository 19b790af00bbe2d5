//! Command renderer: turns an ordered list of shell commands into one
//! format-specific block.

use super::Renderable;
use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};

const CONTINUATION: &str = " && \\\n    ";

/// Renders `commands` as a single Docker `RUN` instruction or a Singularity
/// `%post` section.
///
/// Empty commands are dropped first; if nothing is left the result is the
/// empty string for every format. Unsupported formats also give the empty
/// string (this function is pure and does not report them).
pub fn render_commands(commands: &[String], format: &ContainerFormat) -> String {
    let commands: Vec<&str> = commands
        .iter()
        .map(String::as_str)
        .filter(|c| !c.is_empty())
        .collect();

    if commands.is_empty() {
        return String::new();
    }

    match format {
        ContainerFormat::Docker => format!("RUN {}", commands.join(CONTINUATION)),
        ContainerFormat::Singularity => format!("%post\n    {}", commands.join(CONTINUATION)),
        ContainerFormat::Custom(_) => String::new(),
    }
}

/// Arbitrary shell commands executed at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    commands: Vec<String>,
}

impl Shell {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Renderable for Shell {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "shell") {
            return Ok(String::new());
        }
        Ok(render_commands(&self.commands, format))
    }
}
