//! Chart root detection
//!
//! A directory is a chart root when it holds a `Chart.yaml` (or the rarer
//! `Chart.yml`). Detection is a probe: stat failures never abort a
//! conversion, they only mean "this is not a chart as far as we can tell".

use std::io;
use std::path::{Path, PathBuf};

/// Metadata file names, in lookup order (exact, case-sensitive)
pub const CHART_FILE_NAMES: [&str; 2] = ["Chart.yaml", "Chart.yml"];

/// Result of probing a directory for chart metadata
#[derive(Debug)]
pub enum ChartProbe {
    /// The directory is a chart root; holds the metadata file that was found
    Chart(PathBuf),
    /// No metadata file exists
    NotChart,
    /// The filesystem refused to answer (permissions, broken mounts, ...)
    Indeterminate(io::Error),
}

impl ChartProbe {
    /// Collapse to the boolean view: only a confirmed chart counts
    pub fn is_chart(&self) -> bool {
        matches!(self, ChartProbe::Chart(_))
    }

    /// Path of the metadata file, when a chart was found
    pub fn metadata_file(&self) -> Option<&Path> {
        match self {
            ChartProbe::Chart(path) => Some(path),
            _ => None,
        }
    }
}

/// Probe `dir` for `Chart.yaml`, then `Chart.yml`.
///
/// Errors other than "not found" are kept so callers can tell a confirmed
/// non-chart from a directory that could not be inspected.
pub fn detect_chart(dir: &Path) -> ChartProbe {
    let mut failure = None;

    for name in CHART_FILE_NAMES {
        let candidate = dir.join(name);
        match std::fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => return ChartProbe::Chart(candidate),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!("Could not stat {}: {}", candidate.display(), e);
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => ChartProbe::Indeterminate(e),
        None => ChartProbe::NotChart,
    }
}

/// `true` iff `dir` contains `Chart.yaml` or `Chart.yml`.
///
/// Any stat failure reads as "no".
pub fn is_chart(dir: &Path) -> bool {
    detect_chart(dir).is_chart()
}

/// Directory that would be the chart root for `path`.
///
/// A directory is its own candidate; a file's candidate is its parent
/// (the current directory for a bare file name).
pub fn chart_root_for(path: &Path, is_dir: bool) -> PathBuf {
    if is_dir {
        return path.to_path_buf();
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
