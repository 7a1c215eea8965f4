//! Configuration management
//!
//! Settings come from `config.yaml` in the platform config directory, then
//! environment variables override individual values.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::workflow::WorkflowConfig;

pub const ENV_CONFIG: &str = "QAT_CONFIG";
pub const ENV_USER: &str = "QAT_USER";
pub const ENV_DRAFT: &str = "QAT_DRAFT";

const DRAFT_FILE: &str = "issue-draft.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// User configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name written into audit entries
    pub user: Option<String>,

    /// Where the issue form draft is kept
    pub draft_path: Option<PathBuf>,

    pub workflow: WorkflowConfig,
}

impl Config {
    /// Load the config file and apply environment overrides
    ///
    /// A missing file is not an error; the defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Platform config file location (e.g. `~/.config/qat/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(user) = var(ENV_USER).filter(|u| !u.trim().is_empty()) {
            self.user = Some(user);
        }
        if let Some(draft) = var(ENV_DRAFT).filter(|d| !d.trim().is_empty()) {
            self.draft_path = Some(PathBuf::from(draft));
        }
    }

    /// Actor name for audit entries
    pub fn user(&self) -> String {
        self.user
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Draft file location, falling back to the platform data directory
    pub fn draft_path(&self) -> PathBuf {
        self.draft_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(DRAFT_FILE)))
            .unwrap_or_else(|| PathBuf::from(DRAFT_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "qat")
}
