use super::Builder;
use crate::toolchain::Toolchain;

pub const DEFAULT_PARALLEL: u32 = 4;

/// Autotools-style `./configure && make && make install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureMake {
    prefix: String,
    opts: Vec<String>,
    parallel: u32,
}

impl Default for ConfigureMake {
    fn default() -> Self {
        Self {
            prefix: "/usr/local".to_string(),
            opts: Vec::new(),
            parallel: DEFAULT_PARALLEL,
        }
    }
}

impl ConfigureMake {
    pub fn new(prefix: impl Into<String>, opts: Vec<String>, parallel: u32) -> Self {
        Self {
            prefix: prefix.into(),
            opts,
            parallel: parallel.max(1),
        }
    }

    pub fn opts(&self) -> &[String] {
        &self.opts
    }
}

impl Builder for ConfigureMake {
    fn configure_step(&self, directory: &str, toolchain: &Toolchain) -> String {
        let mut parts = Vec::new();
        if !directory.is_empty() {
            parts.push(format!("cd {} &&", directory));
        }
        parts.extend(toolchain.environment());
        parts.push("./configure".to_string());
        if !self.prefix.is_empty() {
            parts.push(format!("--prefix={}", self.prefix));
        }
        parts.extend(self.opts.iter().cloned());
        parts.join(" ")
    }

    fn build_step(&self) -> String {
        format!("make -j{}", self.parallel)
    }

    fn check_step(&self) -> String {
        format!("make -j{} check", self.parallel)
    }

    fn install_step(&self) -> String {
        format!("make -j{} install", self.parallel)
    }
}
