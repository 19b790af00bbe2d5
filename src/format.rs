//! Container definition formats and the format check every renderable runs first.
//!
//! The set of supported formats is closed. Any other format name is carried in
//! the `Custom` variant so that callers can pass it through a whole recipe: each
//! renderable reports it once and renders nothing instead of failing.

use tracing::error;

/// Output format of a rendered recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    /// Dockerfile syntax (`RUN`, `ENV`, `COPY`, ...)
    Docker,
    /// Singularity / Apptainer definition file syntax (`%post`, `%environment`, ...)
    Singularity,
    /// A format name that is not supported
    Custom(String),
}

impl serde::Serialize for ContainerFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let s = match self {
            Self::Docker => "docker",
            Self::Singularity => "singularity",
            Self::Custom(name) => name.as_str(),
        };
        serializer.serialize_str(s)
    }
}

impl<'de> serde::Deserialize<'de> for ContainerFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_name(&s).unwrap_or(Self::Custom(s)))
    }
}

impl ContainerFormat {
    pub fn name(&self) -> String {
        match self {
            Self::Docker => "Docker".to_string(),
            Self::Singularity => "Singularity".to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Looks up a supported format by name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Docker" | "docker" | "dockerfile" => Some(Self::Docker),
            "Singularity" | "singularity" | "apptainer" => Some(Self::Singularity),
            _ => None,
        }
    }

    /// Parses a format name, keeping unknown names as the unsupported sentinel.
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| Self::Custom(name.to_string()))
    }

    pub fn all_variants() -> &'static [Self] {
        &[Self::Docker, Self::Singularity]
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns `true` when `format` can be rendered.
///
/// For the unsupported sentinel this records one error diagnostic naming the
/// renderable that was asked, and returns `false`; the caller then renders the
/// empty string.
pub fn ensure_supported(format: &ContainerFormat, renderable: &str) -> bool {
    if format.is_supported() {
        return true;
    }
    error!(
        format = %format,
        renderable,
        "unsupported container format, rendering nothing"
    );
    false
}
