/// Clones repositories with `git`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Git {
    depth: Option<u32>,
}

impl Default for Git {
    fn default() -> Self {
        Self { depth: Some(1) }
    }
}

impl Git {
    /// Full-history clones instead of shallow ones.
    pub fn full_history() -> Self {
        Self { depth: None }
    }

    /// Clones `repository` into `path/directory` and returns to the previous
    /// working directory.
    ///
    /// `directory` defaults to the repository name (see [`repository_dir`]).
    pub fn clone_step(
        &self,
        repository: &str,
        branch: Option<&str>,
        path: &str,
        directory: Option<&str>,
        recursive: bool,
    ) -> String {
        let mut opts = Vec::new();
        if let Some(depth) = self.depth {
            opts.push(format!("--depth={}", depth));
        }
        if let Some(branch) = branch.filter(|b| !b.is_empty()) {
            opts.push(format!("--branch {}", branch));
        }
        if recursive {
            opts.push("--recursive".to_string());
        }

        let directory = directory
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| repository_dir(repository));

        let mut clone = vec!["git clone".to_string()];
        clone.extend(opts);
        clone.push(repository.to_string());
        clone.push(directory.to_string());

        format!(
            "mkdir -p {path} && cd {path} && {} && cd -",
            clone.join(" ")
        )
    }
}

/// Directory name `git clone` picks for `repository`: the last path
/// component without a trailing `.git`.
pub fn repository_dir(repository: &str) -> &str {
    let trimmed = repository.trim_end_matches('/');
    let name = trimmed.rsplit(|c| c == '/' || c == ':').next().unwrap_or(trimmed);
    name.strip_suffix(".git").unwrap_or(name)
}
