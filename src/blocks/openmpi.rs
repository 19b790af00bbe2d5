//! OpenMPI building block.
//!
//! Builds OpenMPI from a release tarball, a git checkout, or a source tree
//! staged in the build context, and can emit the reduced instruction list
//! that carries the installation into a runtime stage.

use super::version::Version;
use crate::capability::{
    cleanup_step, Builder, ConfigureMake, Fetcher, GitSource, LocalSource, PackageInstall,
    PackageManager, TarballSource,
};
use crate::error::BlockError;
use crate::format::{ensure_supported, ContainerFormat};
use crate::primitives::{Comment, Copy, Environment};
use crate::render::{InstructionList, Renderable, Shell};
use crate::toolchain::Toolchain;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

const BLOCK_NAME: &str = "openmpi";
const WORKDIR: &str = "/tmp";

pub const DEFAULT_VERSION: &str = "3.0.0";
pub const DEFAULT_BASEURL: &str = "https://www.open-mpi.org/software/ompi";
pub const DEFAULT_PREFIX: &str = "/usr/local/openmpi";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_baseurl() -> String {
    DEFAULT_BASEURL.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_configure_opts() -> Vec<String> {
    vec![
        "--disable-getpwuid".to_string(),
        "--enable-orterun-prefix-by-default".to_string(),
    ]
}

fn default_runtime_ospackages() -> Vec<String> {
    vec!["hwloc".to_string(), "openssh-client".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_parallel() -> u32 {
    crate::capability::configure_make::DEFAULT_PARALLEL
}

/// Text of a scalar that may have been read as a number.
///
/// Recipe blocks are buffered before they reach this struct, which turns an
/// unquoted `version: 3.1` into a float. Floats keep their decimal point, so
/// `4.0` stays `4.0`; digits YAML itself drops (`3.10`) need quoting.
struct ScalarText;

impl<'de> Visitor<'de> for ScalarText {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(format!("{:?}", v))
    }
}

fn deserialize_scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarText)
}

struct OptionalScalarText;

impl<'de> Visitor<'de> for OptionalScalarText {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a number or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<String>, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<String>, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_scalar_text(deserializer).map(Some)
    }
}

fn deserialize_optional_scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalScalarText)
}

/// Options recognised by the OpenMPI block. Unknown keys are ignored when
/// deserializing so recipes can carry options newer blocks understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenMpiConfig {
    #[serde(
        default = "default_version",
        deserialize_with = "deserialize_scalar_text"
    )]
    pub version: String,
    #[serde(default = "default_baseurl")]
    pub baseurl: String,
    #[serde(default)]
    pub check: bool,
    #[serde(default = "default_configure_opts")]
    pub configure_opts: Vec<String>,
    #[serde(default = "default_true")]
    pub cuda: bool,
    #[serde(default = "default_true")]
    pub infiniband: bool,
    /// Source tree in the build context; takes precedence over `repository`.
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default, deserialize_with = "deserialize_optional_scalar_text")]
    pub branch: Option<String>,
    #[serde(default)]
    pub recursive: bool,
    /// Build-time packages; `None` selects the defaults for the source kind.
    #[serde(default)]
    pub ospackages: Option<Vec<String>>,
    #[serde(default = "default_runtime_ospackages")]
    pub runtime_ospackages: Vec<String>,
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_parallel")]
    pub parallel: u32,
    #[serde(default)]
    pub toolchain: Arc<Toolchain>,
}

impl Default for OpenMpiConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            baseurl: default_baseurl(),
            check: false,
            configure_opts: default_configure_opts(),
            cuda: true,
            infiniband: true,
            directory: String::new(),
            repository: String::new(),
            branch: None,
            recursive: false,
            ospackages: None,
            runtime_ospackages: default_runtime_ospackages(),
            package_manager: PackageManager::default(),
            prefix: default_prefix(),
            parallel: default_parallel(),
            toolchain: Arc::new(Toolchain::default()),
        }
    }
}

/// Where the block takes its sources from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tarball,
    Git,
    Local,
}

/// Release download URL:
/// `<baseurl>/v<MAJOR>.<MINOR>/downloads/openmpi-<version>.tar.bz2`.
pub fn download_url(baseurl: &str, version: &Version) -> String {
    format!(
        "{}/v{}/downloads/openmpi-{}.tar.bz2",
        baseurl.trim_end_matches('/'),
        version.series(),
        version
    )
}

/// Replaces every spelling of `--with-<feature>` / `--without-<feature>` in
/// `opts` with exactly one flag for the requested state.
pub fn set_feature_flag(opts: &mut Vec<String>, feature: &str, enabled: bool, path: Option<&str>) {
    let with = format!("--with-{}", feature);
    let with_value = format!("--with-{}=", feature);
    let without = format!("--without-{}", feature);
    opts.retain(|opt| *opt != with && !opt.starts_with(&with_value) && *opt != without);

    let flag = match (enabled, path.filter(|p| !p.is_empty())) {
        (true, Some(path)) => format!("{}={}", with, path),
        (true, None) => with,
        (false, _) => without,
    };
    opts.push(flag);
}

/// The OpenMPI building block.
///
/// Construction only records configuration. The command sequence is computed
/// on the first render and cached, including a configuration error, so later
/// renders neither repeat the work nor append commands twice.
#[derive(Debug)]
pub struct OpenMpi {
    config: OpenMpiConfig,
    commands: OnceLock<Result<Vec<String>, BlockError>>,
}

impl Default for OpenMpi {
    fn default() -> Self {
        Self::new(OpenMpiConfig::default())
    }
}

impl OpenMpi {
    pub fn new(config: OpenMpiConfig) -> Self {
        Self {
            config,
            commands: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &OpenMpiConfig {
        &self.config
    }

    /// Whether setup already ran.
    pub fn is_setup(&self) -> bool {
        self.commands.get().is_some()
    }

    pub fn source_kind(&self) -> SourceKind {
        if !self.config.directory.is_empty() {
            SourceKind::Local
        } else if !self.config.repository.is_empty() {
            SourceKind::Git
        } else {
            SourceKind::Tarball
        }
    }

    /// Shell commands that fetch, build, install and clean up, computed once.
    pub fn commands(&self) -> Result<&[String], BlockError> {
        self.commands
            .get_or_init(|| self.setup())
            .as_deref()
            .map_err(Clone::clone)
    }

    /// `configure` options after applying the CUDA and InfiniBand switches.
    pub fn configure_options(&self) -> Vec<String> {
        let mut opts = self.config.configure_opts.clone();
        set_feature_flag(
            &mut opts,
            "cuda",
            self.config.cuda,
            self.config.toolchain.cuda_home.as_deref(),
        );
        set_feature_flag(&mut opts, "verbs", self.config.infiniband, None);
        opts
    }

    /// Build-time OS packages.
    pub fn ospackages(&self) -> Vec<String> {
        if let Some(packages) = &self.config.ospackages {
            return packages.clone();
        }

        let mut packages: Vec<String> = ["file", "hwloc", "openssh-client", "wget"]
            .iter()
            .map(|p| p.to_string())
            .collect();
        if self.source_kind() == SourceKind::Git {
            packages.extend(
                ["autoconf", "automake", "ca-certificates", "git", "libtool", "perl"]
                    .iter()
                    .map(|p| p.to_string()),
            );
        }
        packages
    }

    /// `PATH` and `LD_LIBRARY_PATH` prefixed with the install tree.
    pub fn environment(&self) -> Environment {
        let prefix = self.config.prefix.trim_end_matches('/');
        Environment::new([
            ("PATH", format!("{}/bin:$PATH", prefix)),
            ("LD_LIBRARY_PATH", format!("{}/lib:$LD_LIBRARY_PATH", prefix)),
        ])
    }

    fn fetcher(&self) -> Result<Box<dyn Fetcher>, BlockError> {
        Ok(match self.source_kind() {
            SourceKind::Local => Box::new(LocalSource::new(&self.config.directory, WORKDIR)),
            SourceKind::Git => Box::new(
                GitSource::new(&self.config.repository, WORKDIR)
                    .branch(self.config.branch.clone())
                    .recursive(self.config.recursive),
            ),
            SourceKind::Tarball => {
                let version = Version::parse(&self.config.version)?;
                if self.config.baseurl.is_empty() {
                    return Err(BlockError::missing_option(BLOCK_NAME, "baseurl"));
                }
                Box::new(TarballSource::new(
                    download_url(&self.config.baseurl, &version),
                    WORKDIR,
                ))
            }
        })
    }

    fn setup(&self) -> Result<Vec<String>, BlockError> {
        if self.config.prefix.is_empty() {
            return Err(BlockError::missing_option(BLOCK_NAME, "prefix"));
        }

        let fetcher = self.fetcher()?;
        let builder = ConfigureMake::new(
            self.config.prefix.clone(),
            self.configure_options(),
            self.config.parallel,
        );
        let source_dir = fetcher.source_dir();

        let mut commands = fetcher.fetch_steps();
        if self.source_kind() == SourceKind::Git {
            commands.push(format!("cd {} && ./autogen.pl", source_dir));
        }
        commands.push(builder.configure_step(&source_dir, &self.config.toolchain));
        commands.push(builder.build_step());
        if self.config.check {
            commands.push(builder.check_step());
        }
        commands.push(builder.install_step());
        commands.push(cleanup_step(&fetcher.artifacts()));

        debug!(
            block = BLOCK_NAME,
            source = ?self.source_kind(),
            commands = commands.len(),
            "setup complete"
        );
        Ok(commands)
    }

    /// The full build instructions for this block.
    pub fn instructions(&self) -> Result<InstructionList, BlockError> {
        let commands = self.commands()?;

        let title = match self.source_kind() {
            SourceKind::Tarball => format!("OpenMPI version {}", self.config.version),
            _ => "OpenMPI".to_string(),
        };

        let mut list = InstructionList::new()
            .with(Comment::new(title))
            .with(PackageInstall::new(
                self.config.package_manager,
                self.ospackages(),
            ));
        if self.source_kind() == SourceKind::Local {
            let local = LocalSource::new(&self.config.directory, WORKDIR);
            list.push(Copy::new(local.context_dir(), local.source_dir()));
        }
        list.push(Shell::new(commands.iter().cloned()));
        list.push(self.environment());

        Ok(list)
    }
}

impl Renderable for OpenMpi {
    fn render(&self, format: &ContainerFormat) -> Result<String, BlockError> {
        if !ensure_supported(format, BLOCK_NAME) {
            return Ok(String::new());
        }
        self.instructions()?.render(format)
    }

    /// Comment, runtime packages, a copy of the install prefix out of the
    /// `from` stage, and the environment. Does not need setup.
    fn runtime(&self, from: &str) -> InstructionList {
        InstructionList::new()
            .with(Comment::new("OpenMPI"))
            .with(PackageInstall::new(
                self.config.package_manager,
                self.config.runtime_ospackages.iter().cloned(),
            ))
            .with(Copy::new(&self.config.prefix, &self.config.prefix).from_stage(from))
            .with(self.environment())
    }
}
