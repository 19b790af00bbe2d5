//! Narrow step generators that building blocks compose by containment.
//!
//! Every capability turns configuration it owns, plus explicit arguments,
//! into single shell commands. A composite block decides the order; the
//! capabilities never look at each other.

pub mod configure_make;
pub mod git;
pub mod packages;
pub mod source;
pub mod tar;
pub mod wget;

use crate::toolchain::Toolchain;
use std::fmt;
use tracing::warn;

pub use configure_make::ConfigureMake;
pub use git::Git;
pub use packages::{PackageInstall, PackageManager};
pub use source::{GitSource, LocalSource, TarballSource};
pub use tar::Tar;
pub use wget::Wget;

/// Stages a source tree inside the image.
pub trait Fetcher: fmt::Debug + Send + Sync {
    /// Commands that put the sources in place, in execution order.
    fn fetch_steps(&self) -> Vec<String>;

    /// Directory that holds the sources once the fetch steps ran.
    fn source_dir(&self) -> String;

    /// Transient paths to remove after the install step.
    fn artifacts(&self) -> Vec<String>;
}

/// Compiles and installs a staged source tree.
pub trait Builder: fmt::Debug + Send + Sync {
    fn configure_step(&self, directory: &str, toolchain: &Toolchain) -> String;
    fn build_step(&self) -> String;
    fn check_step(&self) -> String;
    fn install_step(&self) -> String;
}

/// `rm -rf` of the given paths.
///
/// With nothing to remove this reports a warning and returns the empty
/// string, which the command renderer drops.
pub fn cleanup_step(items: &[String]) -> String {
    if items.is_empty() {
        warn!("cleanup requested without any items");
        return String::new();
    }
    format!("rm -rf {}", items.join(" "))
}

/// Joins two container paths with `/`; an absolute `leaf` replaces `base`.
pub fn posix_join(base: &str, leaf: &str) -> String {
    if leaf.starts_with('/') || base.is_empty() {
        return leaf.to_string();
    }
    if leaf.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), leaf)
}
