//! CLI commands

pub mod convert;
pub mod inspect;

use chartflat_core::parse_kube_version;

use crate::config::CliConfig;
use crate::error::{CliError, Result};

/// Kube version from the flag (or its env var), else the config file.
/// Validated but passed on as written.
pub(crate) fn resolve_kube_version(flag: Option<&str>, config: &CliConfig) -> Result<String> {
    let version = flag.unwrap_or(config.kube_version.as_str()).trim();
    parse_kube_version(version).map_err(|e| {
        CliError::usage_with_help(e.to_string(), "Use a version such as 1.29.0 or v1.29.0")
    })?;
    Ok(version.to_string())
}
