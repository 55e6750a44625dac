//! Helm chart model and loading
//!
//! A `LoadedChart` is a snapshot of a chart directory as it is on disk.
//! Nothing mutates it after loading: when something changes the directory
//! (a dependency download filling `charts/`), load it again.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::detect::{ChartProbe, detect_chart};
use crate::error::{CoreError, Result};

/// Chart.yaml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    /// API version (v1 or v2)
    #[serde(default)]
    pub api_version: String,

    /// Chart name
    #[serde(default)]
    pub name: String,

    /// Chart version (SemVer)
    #[serde(default)]
    pub version: String,

    /// Kubernetes version constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Chart type (application or library)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// Chart dependencies
    #[serde(default)]
    pub dependencies: Vec<ChartDependency>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Entry of the `dependencies` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDependency {
    /// Dependency name
    pub name: String,

    /// Version constraint
    #[serde(default)]
    pub version: String,

    /// Repository URL, `@alias` or `file://` path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Condition to enable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ChartDependency {
    /// Alias if set, otherwise the name
    #[inline]
    pub fn effective_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// `requirements.yaml` of apiVersion v1 charts
#[derive(Debug, Deserialize)]
struct Requirements {
    #[serde(default)]
    dependencies: Vec<ChartDependency>,
}

impl ChartMetadata {
    /// Parse Chart.yaml content; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let metadata: ChartMetadata =
            serde_yaml::from_str(content).map_err(|source| CoreError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        if metadata.name.trim().is_empty() {
            return Err(CoreError::MissingField {
                path: path.to_path_buf(),
                field: "name".to_string(),
            });
        }
        if metadata.version.trim().is_empty() {
            return Err(CoreError::MissingField {
                path: path.to_path_buf(),
                field: "version".to_string(),
            });
        }

        Ok(metadata)
    }

    /// Kubernetes version constraint, if one is declared
    pub fn kube_version_constraint(&self) -> Option<&str> {
        self.kube_version
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Whether this is a library chart (renders nothing by itself)
    pub fn is_library(&self) -> bool {
        self.chart_type.as_deref() == Some("library")
    }
}

/// Chart loaded from disk with resolved paths
#[derive(Debug, Clone)]
pub struct LoadedChart {
    /// Parsed metadata (dependencies include requirements.yaml for v1 charts)
    pub metadata: ChartMetadata,

    /// Root directory of the chart
    pub root: PathBuf,

    /// The Chart.yaml / Chart.yml that was read
    pub metadata_file: PathBuf,

    /// Parsed values.yaml, if present
    pub values: Option<serde_yaml::Value>,

    /// Files under templates/, sorted
    pub templates: Vec<PathBuf>,

    /// Files under crds/, sorted
    pub crds: Vec<PathBuf>,

    /// Vendored sub-charts in charts/ (directories and .tgz archives), sorted
    pub subcharts: Vec<PathBuf>,
}

impl LoadedChart {
    /// Load a chart from its root directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        if !root.is_dir() {
            return Err(CoreError::ChartNotFound { path: root });
        }

        let metadata_file = match detect_chart(&root) {
            ChartProbe::Chart(file) => file,
            ChartProbe::NotChart => {
                return Err(CoreError::InvalidChart {
                    path: root,
                    message: "Chart.yaml not found".to_string(),
                });
            }
            ChartProbe::Indeterminate(e) => return Err(CoreError::Io(e)),
        };

        let content = std::fs::read_to_string(&metadata_file)?;
        let mut metadata = ChartMetadata::parse(&content, &metadata_file)?;

        if metadata.dependencies.is_empty() {
            metadata.dependencies = Self::legacy_requirements(&root)?;
        }

        let values_path = root.join("values.yaml");
        let values = if values_path.is_file() {
            let content = std::fs::read_to_string(&values_path)?;
            let parsed: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|source| CoreError::YamlParse {
                    path: values_path.clone(),
                    source,
                })?;
            Some(parsed)
        } else {
            None
        };

        let templates = Self::files_under(&root.join("templates"))?;
        let crds = Self::files_under(&root.join("crds"))?;
        let subcharts = Self::vendored_charts(&root.join("charts"))?;

        tracing::debug!(
            "Loaded chart {} {} from {} ({} templates, {} sub-charts)",
            metadata.name,
            metadata.version,
            root.display(),
            templates.len(),
            subcharts.len()
        );

        Ok(Self {
            metadata,
            root,
            metadata_file,
            values,
            templates,
            crds,
            subcharts,
        })
    }

    /// Chart name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Whether Chart.yaml (or requirements.yaml) declares dependencies
    pub fn has_dependencies(&self) -> bool {
        !self.metadata.dependencies.is_empty()
    }

    /// Declared dependencies with no matching entry in charts/
    ///
    /// Matching is by name prefix, which covers both `charts/redis/` and
    /// `charts/redis-17.3.0.tgz`.
    pub fn missing_dependencies(&self) -> Vec<&ChartDependency> {
        self.metadata
            .dependencies
            .iter()
            .filter(|dep| {
                !self.subcharts.iter().any(|sub| {
                    sub.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(dep.name.as_str()))
                })
            })
            .collect()
    }

    /// v1 charts keep their dependencies in requirements.yaml
    fn legacy_requirements(root: &Path) -> Result<Vec<ChartDependency>> {
        let path = root.join("requirements.yaml");
        if !path.is_file() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let requirements: Requirements =
            serde_yaml::from_str(&content).map_err(|source| CoreError::YamlParse {
                path: path.clone(),
                source,
            })?;
        Ok(requirements.dependencies)
    }

    fn files_under(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        if !dir.is_dir() {
            return Ok(files);
        }

        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn vendored_charts(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut charts = Vec::new();

        if !dir.is_dir() {
            return Ok(charts);
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_archive = path.extension().is_some_and(|ext| ext == "tgz");
            if path.is_dir() || is_archive {
                charts.push(path);
            }
        }

        charts.sort();
        Ok(charts)
    }
}
