/// Downloads files with `wget`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wget {
    opts: Vec<String>,
}

impl Default for Wget {
    fn default() -> Self {
        Self {
            opts: vec![
                "-q".to_string(),
                "-nc".to_string(),
                "--no-check-certificate".to_string(),
            ],
        }
    }
}

impl Wget {
    pub fn with_opts<I, S>(opts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            opts: opts.into_iter().map(Into::into).collect(),
        }
    }

    /// Downloads `url` into `directory`, creating the directory first.
    pub fn download_step(&self, url: &str, directory: &str) -> String {
        let mut parts = vec!["wget".to_string()];
        parts.extend(self.opts.iter().cloned());
        parts.push(format!("-P {}", directory));
        parts.push(url.to_string());
        format!("mkdir -p {} && {}", directory, parts.join(" "))
    }
}
