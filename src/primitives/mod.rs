//! Leaf renderables that wrap a single container-definition directive.

pub mod baseimage;
pub mod comment;
pub mod copy;
pub mod environment;
pub mod raw;
pub mod workdir;

pub use baseimage::BaseImage;
pub use comment::Comment;
pub use copy::Copy;
pub use environment::Environment;
pub use raw::Raw;
pub use workdir::Workdir;
