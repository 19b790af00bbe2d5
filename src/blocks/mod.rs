//! Composite building blocks: one full install lifecycle per block.

pub mod openmpi;
pub mod version;

pub use openmpi::{OpenMpi, OpenMpiConfig, SourceKind};
pub use version::Version;
