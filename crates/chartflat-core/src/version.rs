//! Kubernetes version handling
//!
//! Chart metadata carries a `kubeVersion` *constraint* such as `>=1.19.0-0`
//! or `~>v1.2.3`, while a dry run needs one concrete version. The helpers
//! here pull the trailing semantic version out of a constraint and decide
//! which version a render should target.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;

use crate::error::{CoreError, Result};

/// Trailing `[v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
///
/// Group 1 stops before the build metadata so it can be dropped.
static TRAILING_SEMVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(v?[0-9]+\.[0-9]+\.[0-9]+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)",
        r"(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    ))
    .expect("valid regex")
});

/// Extract the semantic version that ends `constraint`.
///
/// Build metadata is stripped. Returns an empty string when the constraint
/// does not end in a version (`"latest"`, `">= 1.19"`); callers treat that as
/// "no override available", not as an error.
///
/// ```
/// use chartflat_core::extract_semver;
///
/// assert_eq!(extract_semver("~>v1.2.3-beta.1"), "v1.2.3-beta.1");
/// assert_eq!(extract_semver(">=2.0.0+build5"), "2.0.0");
/// assert_eq!(extract_semver("latest"), "");
/// ```
pub fn extract_semver(constraint: &str) -> &str {
    TRAILING_SEMVER
        .captures(constraint)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Pick the Kubernetes version a dry run should target.
///
/// A version extracted from the chart's own constraint wins over the
/// caller's default. `None` means the renderer should use its built-in
/// default.
pub fn effective_kube_version(default: &str, chart_constraint: Option<&str>) -> Option<String> {
    let extracted = chart_constraint.map_or("", extract_semver);
    let version = if extracted.is_empty() {
        default.trim()
    } else {
        extracted
    };

    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Validate a user-supplied Kubernetes version (`1.29.0`, `v1.29.0`).
///
/// An empty input is accepted and yields `None`.
pub fn parse_kube_version(input: &str) -> Result<Option<Version>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare)
        .map(Some)
        .map_err(|source| CoreError::InvalidVersion {
            input: input.to_string(),
            source,
        })
}
