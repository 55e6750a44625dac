//! Path classification and conversion entry point

use std::io::Write;
use std::path::{Path, PathBuf};

use chartflat_core::{ChartProbe, chart_root_for, detect_chart};
use chartflat_helm::{DependencyManager, HelmBinary, InstallSimulator};

use crate::error::{ConvertError, Result};
use crate::loader::ChartLoader;
use crate::sink::write_separator;
use crate::yaml::{is_yaml_like, to_yaml};

/// What a conversion did with its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Rendered the chart rooted at `root`
    Chart { root: PathBuf },
    /// Re-encoded `files` plain YAML files
    Manifests { files: usize },
    /// Neither a chart nor YAML: nothing was written
    Unsupported { path: PathBuf },
}

/// Converts charts, YAML files and YAML trees into one manifest stream
#[derive(Debug, Clone)]
pub struct ManifestConverter<S, D> {
    loader: ChartLoader<S, D>,
}

impl ManifestConverter<HelmBinary, HelmBinary> {
    /// Converter backed by one `helm` executable for both rendering and
    /// dependency updates
    pub fn helm(helm: HelmBinary) -> Self {
        Self::new(helm.clone(), helm)
    }
}

impl<S: InstallSimulator, D: DependencyManager> ManifestConverter<S, D> {
    pub fn new(simulator: S, dependencies: D) -> Self {
        Self {
            loader: ChartLoader::new(simulator, dependencies),
        }
    }

    pub fn loader(&self) -> &ChartLoader<S, D> {
        &self.loader
    }

    /// Convert whatever lives at `path` into `sink`.
    ///
    /// A directory (or a file's parent directory) holding Chart.yaml is
    /// rendered as a chart. Otherwise a directory is walked and each file
    /// written as YAML followed by `---`, and a YAML/JSON file is written
    /// the same way. The first failure aborts; bytes already written stay
    /// in `sink`.
    pub fn convert(
        &self,
        path: &Path,
        default_kube_version: &str,
        sink: &mut dyn Write,
    ) -> Result<ConvertOutcome> {
        let info = std::fs::metadata(path).map_err(|source| ConvertError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;

        let root = chart_root_for(path, info.is_dir());
        match detect_chart(&root) {
            ChartProbe::Chart(metadata_file) => {
                tracing::debug!("Found {}, rendering as chart", metadata_file.display());
                self.loader.load(&root, sink, default_kube_version)?;
                return Ok(ConvertOutcome::Chart { root });
            }
            ChartProbe::NotChart => {}
            ChartProbe::Indeterminate(e) => {
                tracing::warn!(
                    "Could not check {} for Chart.yaml ({}), treating it as plain YAML",
                    root.display(),
                    e
                );
            }
        }

        if info.is_dir() {
            let files = write_tree(path, sink)?;
            Ok(ConvertOutcome::Manifests { files })
        } else if is_yaml_like(path) {
            write_file(path, sink)?;
            Ok(ConvertOutcome::Manifests { files: 1 })
        } else {
            tracing::warn!(
                "{} is neither a chart nor a YAML file, nothing to convert",
                path.display()
            );
            Ok(ConvertOutcome::Unsupported {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Convert `path` using the `helm` found on `PATH`
pub fn convert(path: &Path, default_kube_version: &str, sink: &mut dyn Write) -> Result<ConvertOutcome> {
    ManifestConverter::helm(HelmBinary::default()).convert(path, default_kube_version, sink)
}

/// Write every regular file below `dir`, depth first.
///
/// Symlinks are followed, so a linked manifest is written like any other
/// file; a dangling link or a link cycle aborts the walk.
fn write_tree(dir: &Path, sink: &mut dyn Write) -> Result<usize> {
    let mut files = 0;

    for entry in walkdir::WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ConvertError::ReadDir {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;

        if entry.file_type().is_file() {
            write_file(entry.path(), sink)?;
            files += 1;
        }
    }

    Ok(files)
}

/// Read, re-encode and write one file, then a `---` line
fn write_file(path: &Path, sink: &mut dyn Write) -> Result<()> {
    tracing::debug!("Normalizing {}", path.display());

    let data = std::fs::read(path).map_err(|source| ConvertError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let normalized = to_yaml(&data).map_err(|source| ConvertError::InvalidYaml {
        path: path.to_path_buf(),
        source,
    })?;

    let write_error = |source: std::io::Error| ConvertError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    sink.write_all(&normalized).map_err(write_error)?;
    write_separator(sink, &normalized).map_err(write_error)?;

    Ok(())
}
