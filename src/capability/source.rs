//! The three ways a block gets its sources: tarball download, git clone, or
//! a directory already staged in the build context.

use super::git::repository_dir;
use super::tar::tarball_stem;
use super::{posix_join, Fetcher, Git, Tar, Wget};

/// Downloads a tarball and unpacks it under `workdir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarballSource {
    url: String,
    workdir: String,
    wget: Wget,
    tar: Tar,
}

impl TarballSource {
    pub fn new(url: impl Into<String>, workdir: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            workdir: workdir.into(),
            wget: Wget::default(),
            tar: Tar,
        }
    }

    /// File name of the tarball, the last component of the URL.
    pub fn tarball(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    fn tarball_path(&self) -> String {
        posix_join(&self.workdir, self.tarball())
    }
}

impl Fetcher for TarballSource {
    fn fetch_steps(&self) -> Vec<String> {
        vec![
            self.wget.download_step(&self.url, &self.workdir),
            self.tar.untar_step(&self.tarball_path(), &self.workdir),
        ]
    }

    fn source_dir(&self) -> String {
        posix_join(&self.workdir, tarball_stem(self.tarball()))
    }

    fn artifacts(&self) -> Vec<String> {
        vec![self.tarball_path(), self.source_dir()]
    }
}

/// Clones a repository under `workdir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    repository: String,
    branch: Option<String>,
    recursive: bool,
    workdir: String,
    git: Git,
}

impl GitSource {
    pub fn new(repository: impl Into<String>, workdir: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: None,
            recursive: false,
            workdir: workdir.into(),
            git: Git::default(),
        }
    }

    pub fn branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch.filter(|b| !b.is_empty());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

impl Fetcher for GitSource {
    fn fetch_steps(&self) -> Vec<String> {
        vec![self.git.clone_step(
            &self.repository,
            self.branch.as_deref(),
            &self.workdir,
            None,
            self.recursive,
        )]
    }

    fn source_dir(&self) -> String {
        posix_join(&self.workdir, repository_dir(&self.repository))
    }

    fn artifacts(&self) -> Vec<String> {
        vec![self.source_dir()]
    }
}

/// Sources copied from the build context into `workdir/directory` by a
/// separate copy instruction. No fetch commands are needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSource {
    directory: String,
    workdir: String,
}

impl LocalSource {
    pub fn new(directory: impl Into<String>, workdir: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            workdir: workdir.into(),
        }
    }

    /// Path of the directory in the build context.
    pub fn context_dir(&self) -> &str {
        &self.directory
    }
}

impl Fetcher for LocalSource {
    fn fetch_steps(&self) -> Vec<String> {
        Vec::new()
    }

    fn source_dir(&self) -> String {
        posix_join(&self.workdir, &self.directory)
    }

    fn artifacts(&self) -> Vec<String> {
        vec![self.source_dir()]
    }
}
