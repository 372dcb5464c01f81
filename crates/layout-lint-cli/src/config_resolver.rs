//! Locating and loading the configuration file.
//!
//! Candidates are tried in order:
//!
//! 1. `--config` flag (explicit path, not checked for existence)
//! 2. `layout-lint.toml`, then `.layout-lint.toml`, in the checked directory
//! 3. `config.toml` in `$LAYOUT_LINT_CONFIG_DIR`, else in `~/.layout-lint/`
//! 4. built-in defaults

use anyhow::{Context, Result};
use layout_lint_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: [&str; 2] = ["layout-lint.toml", ".layout-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "LAYOUT_LINT_CONFIG_DIR";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the checked documents.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config comes from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Reads the configuration, or the defaults when nothing was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration found, using defaults");
            return Ok(Config::default());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Candidate locations for one run.
#[derive(Debug, Clone)]
struct Resolver<'a> {
    project_dir: &'a Path,
    explicit: Option<&'a Path>,
    global_dir: Option<PathBuf>,
}

impl Resolver<'_> {
    fn resolve(self) -> ConfigSource {
        if let Some(path) = self.explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.project_dir.join(name))
            .find(|candidate| candidate.is_file());
        if let Some(path) = project {
            tracing::debug!("Found project config: {}", path.display());
            return ConfigSource::Project(path);
        }

        let global = self
            .global_dir
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|candidate| candidate.is_file());
        if let Some(path) = global {
            tracing::debug!("Found global config: {}", path.display());
            return ConfigSource::Global(path);
        }

        ConfigSource::Default
    }
}

/// Resolves the configuration for documents under `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    Resolver {
        project_dir,
        explicit,
        global_dir: global_config_dir(),
    }
    .resolve()
}

/// Returns the global config directory: `$LAYOUT_LINT_CONFIG_DIR`, else
/// `~/.layout-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".layout-lint")))
}
