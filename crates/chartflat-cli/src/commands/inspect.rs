//! Inspect command - show how a path would be converted

use std::path::{Path, PathBuf};

use chartflat_core::{ChartProbe, LoadedChart, chart_root_for, detect_chart, effective_kube_version};
use chartflat_convert::is_yaml_like;
use serde::Serialize;

use crate::config::CliConfig;
use crate::display;
use crate::error::{CliError, Result};

/// What a path is, as far as `convert` is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Chart,
    Directory,
    Yaml,
    Unsupported,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub path: PathBuf,
    pub kind: PathKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub root: PathBuf,
    pub name: String,
    pub version: String,
    pub kube_version_constraint: Option<String>,
    pub effective_kube_version: Option<String>,
    pub dependencies: Vec<DependencyReport>,
    pub subcharts: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    pub name: String,
    pub version: String,
    pub repository: Option<String>,
    pub vendored: bool,
}

pub fn run(path: &Path, kube_version: Option<&str>, json: bool, config: &CliConfig) -> Result<()> {
    let kube_version = super::resolve_kube_version(kube_version, config)?;
    let report = inspect(path, &kube_version)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(|e| CliError::Io {
            message: e.to_string(),
        })?;
        println!("{rendered}");
    } else {
        display::print_report(&report);
    }

    Ok(())
}

/// Classify `path` the same way the converter does, without rendering
pub fn inspect(path: &Path, default_kube_version: &str) -> Result<InspectReport> {
    let info = std::fs::metadata(path).map_err(|e| CliError::Io {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let root = chart_root_for(path, info.is_dir());
    let kind = match detect_chart(&root) {
        ChartProbe::Chart(_) => PathKind::Chart,
        ChartProbe::Indeterminate(e) => {
            tracing::warn!("Could not check {} for Chart.yaml: {}", root.display(), e);
            plain_kind(path, info.is_dir())
        }
        ChartProbe::NotChart => plain_kind(path, info.is_dir()),
    };

    let chart = if kind == PathKind::Chart {
        Some(chart_report(&root, default_kube_version)?)
    } else {
        None
    };

    Ok(InspectReport {
        path: path.to_path_buf(),
        kind,
        chart,
    })
}

fn plain_kind(path: &Path, is_dir: bool) -> PathKind {
    if is_dir {
        PathKind::Directory
    } else if is_yaml_like(path) {
        PathKind::Yaml
    } else {
        PathKind::Unsupported
    }
}

fn chart_report(root: &Path, default_kube_version: &str) -> Result<ChartReport> {
    let chart = LoadedChart::load(root).map_err(|e| CliError::chart(e.to_string()))?;

    let missing: Vec<&str> = chart
        .missing_dependencies()
        .into_iter()
        .map(|dep| dep.name.as_str())
        .collect();

    let dependencies = chart
        .metadata
        .dependencies
        .iter()
        .map(|dep| DependencyReport {
            name: dep.effective_name().to_string(),
            version: dep.version.clone(),
            repository: dep.repository.clone(),
            vendored: !missing.contains(&dep.name.as_str()),
        })
        .collect();

    let constraint = chart.metadata.kube_version_constraint();
    Ok(ChartReport {
        root: chart.root.clone(),
        name: chart.metadata.name.clone(),
        version: chart.metadata.version.clone(),
        kube_version_constraint: constraint.map(str::to_string),
        effective_kube_version: effective_kube_version(default_kube_version, constraint),
        dependencies,
        subcharts: chart
            .subcharts
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_chart() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Chart.yaml"),
            "apiVersion: v2\nname: shop\nversion: 1.2.0\nkubeVersion: \">=1.26.0-0\"\n\
             dependencies:\n  - name: redis\n    version: 17.x\n    repository: https://charts.example.com\n  \
             - name: postgresql\n    version: 12.x\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("charts/redis")).unwrap();
        fs::write(dir.path().join("charts/redis/Chart.yaml"), "name: redis\nversion: 17.3.0\n").unwrap();

        let report = inspect(&dir.path().join("Chart.yaml"), "1.29.0").unwrap();

        assert_eq!(report.kind, PathKind::Chart);
        let chart = report.chart.unwrap();
        assert_eq!(chart.name, "shop");
        assert_eq!(chart.effective_kube_version.as_deref(), Some("1.26.0-0"));
        assert_eq!(chart.subcharts, vec!["redis".to_string()]);
        assert!(chart.dependencies[0].vendored);
        assert!(!chart.dependencies[1].vendored);
    }

    #[test]
    fn test_inspect_plain_paths() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("svc.yaml"), "kind: Service\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();

        assert_eq!(inspect(dir.path(), "").unwrap().kind, PathKind::Directory);
        assert_eq!(inspect(&dir.path().join("svc.yaml"), "").unwrap().kind, PathKind::Yaml);
        assert_eq!(
            inspect(&dir.path().join("notes.txt"), "").unwrap().kind,
            PathKind::Unsupported
        );
    }

    #[test]
    fn test_inspect_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = inspect(&dir.path().join("nope"), "").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
