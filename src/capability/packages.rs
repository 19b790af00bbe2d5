//! Operating system package installation.

use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::render::{render_commands, Renderable};
use serde::{Deserialize, Serialize};

/// Distribution package manager front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Debian / Ubuntu
    #[default]
    #[serde(alias = "apt-get")]
    Apt,
    /// Alpine / Wolfi
    Apk,
}

impl PackageManager {
    fn update(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get update -y",
            PackageManager::Apk => "apk update",
        }
    }

    fn install(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get install -y --no-install-recommends",
            PackageManager::Apk => "apk add --no-cache",
        }
    }

    fn cleanup(self) -> &'static str {
        match self {
            PackageManager::Apt => "rm -rf /var/lib/apt/lists/*",
            PackageManager::Apk => "rm -rf /var/cache/apk/*",
        }
    }
}

/// Installs a list of packages: update, one install command, cache cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInstall {
    manager: PackageManager,
    packages: Vec<String>,
}

impl PackageInstall {
    pub fn new<I, S>(manager: PackageManager, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            manager,
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for `apt-get`.
    pub fn apt<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(PackageManager::Apt, packages)
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn update_step(&self) -> String {
        self.manager.update().to_string()
    }

    /// One install command with every package on its own line, in input
    /// order. `None` when there is nothing to install.
    pub fn install_step(&self) -> Option<String> {
        if self.packages.is_empty() {
            return None;
        }
        let packages: Vec<String> = self
            .packages
            .iter()
            .map(|pkg| format!("        {}", pkg))
            .collect();
        Some(format!(
            "{} \\\n{}",
            self.manager.install(),
            packages.join(" \\\n")
        ))
    }

    pub fn cleanup_step(&self) -> String {
        self.manager.cleanup().to_string()
    }

    /// Update, install (if any packages), cleanup.
    pub fn commands(&self) -> Vec<String> {
        let mut commands = vec![self.update_step()];
        commands.extend(self.install_step());
        commands.push(self.cleanup_step());
        commands
    }
}

impl Renderable for PackageInstall {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, "package install") {
            return Ok(String::new());
        }
        Ok(render_commands(&self.commands(), format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_package_list_keeps_update_and_cleanup() {
        let p = PackageInstall::apt(Vec::<String>::new());
        assert_eq!(
            p.commands(),
            vec!["apt-get update -y", "rm -rf /var/lib/apt/lists/*"]
        );
        assert!(p.install_step().is_none());
    }

    #[test]
    fn test_packages_keep_input_order() {
        let p = PackageInstall::apt(["zlib1g", "autoconf", "make"]);
        assert_eq!(
            p.install_step().unwrap(),
            "apt-get install -y --no-install-recommends \\\n        zlib1g \\\n        autoconf \\\n        make"
        );
    }

    #[test]
    fn test_docker_rendering() {
        let p = PackageInstall::apt(["file", "wget"]);
        assert_eq!(
            p.render(&ContainerFormat::Docker).unwrap(),
            "RUN apt-get update -y && \\\n    apt-get install -y --no-install-recommends \\\n        file \\\n        wget && \\\n    rm -rf /var/lib/apt/lists/*"
        );
    }

    #[test]
    fn test_singularity_rendering() {
        let p = PackageInstall::apt(["file"]);
        assert_eq!(
            p.render(&ContainerFormat::Singularity).unwrap(),
            "%post\n    apt-get update -y && \\\n    apt-get install -y --no-install-recommends \\\n        file && \\\n    rm -rf /var/lib/apt/lists/*"
        );
    }

    #[test]
    fn test_apk() {
        let p = PackageInstall::new(PackageManager::Apk, ["curl"]);
        assert_eq!(
            p.commands(),
            vec![
                "apk update",
                "apk add --no-cache \\\n        curl",
                "rm -rf /var/cache/apk/*"
            ]
        );
    }

    #[test]
    fn test_manager_deserialization() {
        let m: PackageManager = serde_yaml::from_str("apk").unwrap();
        assert_eq!(m, PackageManager::Apk);
        let m: PackageManager = serde_yaml::from_str("apt-get").unwrap();
        assert_eq!(m, PackageManager::Apt);
    }
}
