use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::Renderable;

const WRAP_WIDTH: usize = 70;

/// A `#` comment line (or lines) in the container definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
    reformat: bool,
}

impl Comment {
    /// Comment whose text is re-flowed into lines of at most 70 characters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reformat: true,
        }
    }

    /// Keeps the original line breaks instead of re-flowing the text.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reformat: false,
        }
    }

    fn lines(&self) -> Vec<String> {
        if self.reformat {
            wrap_words(&self.text, WRAP_WIDTH)
        } else {
            self.text.lines().map(str::to_string).collect()
        }
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

impl Renderable for Comment {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "comment") {
            return Ok(String::new());
        }

        // Same syntax for Docker and Singularity
        Ok(self
            .lines()
            .iter()
            .map(|line| format!("# {}", line))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
