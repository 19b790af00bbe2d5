//! The rendering model shared by every building block.
//!
//! A [`Renderable`] turns itself into text for one [`ContainerFormat`]. An
//! [`InstructionList`] is an ordered sequence of renderables and is itself
//! renderable, so the same join rule applies inside a composite block and
//! across a whole recipe:
//!
//! - elements are rendered in insertion order, which is execution order
//! - non-empty outputs are separated by one blank line
//! - elements that render to the empty string leave no trace

pub mod shell;

use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use std::fmt;
use tracing::error;

pub use shell::{render_commands, Shell};

/// Separator between rendered elements of an instruction list.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Anything that can be written into a container definition.
pub trait Renderable: fmt::Debug + Send + Sync {
    /// Renders this element for `format`.
    ///
    /// Unsupported formats render to the empty string after one diagnostic.
    /// Errors are reserved for invalid configuration discovered while the
    /// element computes its instructions.
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError>;

    /// Renders this element, replacing a failure with the empty string and
    /// an error diagnostic.
    fn render_lenient(&self, format: &ContainerFormat) -> String {
        self.render(format).unwrap_or_else(|e| {
            error!(error = %e, "Skipping instruction that failed to render");
            String::new()
        })
    }

    /// Instructions that carry this element's installed artifacts into a
    /// later stage built from `from`. Most elements have none.
    fn runtime(&self, _from: &str) -> InstructionList {
        InstructionList::new()
    }
}

/// Ordered list of renderables.
#[derive(Debug, Default)]
pub struct InstructionList {
    items: Vec<Box<dyn Renderable>>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends `item`, builder style.
    pub fn with(mut self, item: impl Renderable + 'static) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: impl Renderable + 'static) {
        self.items.push(Box::new(item));
    }

    pub fn push_boxed(&mut self, item: Box<dyn Renderable>) {
        self.items.push(item);
    }

    /// Moves every element of `other` to the end of this list.
    pub fn append(&mut self, other: InstructionList) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Renderable> {
        self.items.iter().map(|item| item.as_ref())
    }
}

impl Renderable for InstructionList {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "instruction list") {
            return Ok(String::new());
        }

        let mut parts = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let text = item.render(format).map_err(|source| BlockError::Element {
                index,
                source: Box::new(source),
            })?;
            if !text.is_empty() {
                parts.push(text);
            }
        }

        Ok(parts.join(BLOCK_SEPARATOR))
    }

    /// Skips failing elements at any depth, so one misconfigured block does
    /// not take its whole stage with it.
    fn render_lenient(&self, format: &ContainerFormat) -> String {
        if !ensure_supported(format, "instruction list") {
            return String::new();
        }

        let parts: Vec<String> = self
            .items
            .iter()
            .map(|item| item.render_lenient(format))
            .filter(|text| !text.is_empty())
            .collect();

        parts.join(BLOCK_SEPARATOR)
    }

    fn runtime(&self, from: &str) -> InstructionList {
        let mut runtime = InstructionList::new();
        for item in &self.items {
            runtime.append(item.runtime(from));
        }
        runtime
    }
}

impl FromIterator<Box<dyn Renderable>> for InstructionList {
    fn from_iter<T: IntoIterator<Item = Box<dyn Renderable>>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
