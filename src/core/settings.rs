//! Settings resolution: defaults < config file < environment < command line

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REPOS_ROOT};
use crate::output::OutputFormat;
use crate::utils::expand_tilde;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`; every key is optional
///
/// ```toml
/// root = "~/src"
/// fetch = false
/// out = "flat"
/// jobs = 16
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<String>,
    pub fetch: Option<bool>,
    pub out: Option<OutputFormat>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Default location of the config file, `None` if the platform has no config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the config file at `path`; a missing file yields the empty config
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config file {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line or through environment variables
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub root: Option<String>,
    /// `true` forces fetching; `false` leaves the config file value in place
    pub fetch: bool,
    pub output: Option<OutputFormat>,
    pub jobs: Option<usize>,
}

/// Effective settings of a listing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub fetch: bool,
    pub output: OutputFormat,
    /// Worker pool size, `None` for the default
    pub jobs: Option<usize>,
}

impl Settings {
    pub fn resolve(file: FileConfig, overrides: SettingsOverrides) -> Self {
        let root = overrides
            .root
            .or(file.root)
            .unwrap_or_else(|| DEFAULT_REPOS_ROOT.to_string());

        Self {
            root: expand_tilde(&root),
            fetch: overrides.fetch || file.fetch.unwrap_or(false),
            output: overrides.output.or(file.out).unwrap_or_default(),
            jobs: overrides.jobs.or(file.jobs),
        }
    }

    /// Resolves settings using the config file from its default location
    pub fn load(overrides: SettingsOverrides) -> Result<Self, SettingsError> {
        let file = match FileConfig::default_path() {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, overrides))
    }
}
