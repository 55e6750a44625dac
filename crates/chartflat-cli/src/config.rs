//! User configuration
//!
//! Stored in `~/.config/chartflat/config.yaml`. Every key is optional;
//! command-line flags and their environment variables take precedence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Default Kubernetes version for chart dry runs (empty: let helm decide)
    pub kube_version: String,

    /// helm executable, looked up on PATH when not absolute
    pub helm_binary: PathBuf,

    /// Pass `--skip-refresh` to `helm dependency update`
    pub skip_refresh: bool,

    /// Copy dependency download progress into the manifest output
    pub forward_dependency_output: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            kube_version: String::new(),
            helm_binary: PathBuf::from("helm"),
            skip_refresh: false,
            forward_dependency_output: true,
        }
    }
}

impl CliConfig {
    /// Load from `explicit` when given (it must exist), otherwise from the
    /// default location when a file is there
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config_with_help(
                format!("Failed to read {}: {}", path.display(), e),
                "Check the path given to --config",
            )
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            CliError::config_with_help(
                format!("Failed to parse {}: {}", path.display(), e),
                "Known keys: kubeVersion, helmBinary, skipRefresh, forwardDependencyOutput",
            )
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get default configuration path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chartflat").join("config.yaml"))
    }
}
