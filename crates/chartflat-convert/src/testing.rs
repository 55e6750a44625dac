//! In-memory stand-in for helm

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chartflat_core::LoadedChart;
use chartflat_helm::{DependencyManager, HelmError, InstallConfig, InstallSimulator, Release};

/// What the fake saw during one render
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub root: PathBuf,
    pub subcharts: usize,
    pub config: InstallConfig,
}

#[derive(Default)]
pub struct FakeHelm {
    /// Manifest to return; `None` makes the render fail
    pub manifest: Option<String>,
    /// Progress text written on a successful update
    pub progress: String,
    /// Make `dependency update` fail with this stderr
    pub dependency_error: Option<String>,
    /// Sub-charts created under charts/ by `dependency update`
    pub vendors: Vec<&'static str>,
    pub renders: RefCell<Vec<RenderCall>>,
    pub updates: RefCell<Vec<PathBuf>>,
}

impl FakeHelm {
    pub fn rendering(manifest: &str) -> Self {
        Self {
            manifest: Some(manifest.to_string()),
            ..Self::default()
        }
    }
}

fn failed(command: &str, stderr: &str) -> HelmError {
    HelmError::CommandFailed {
        command: command.to_string(),
        status: "exit code 1".to_string(),
        stderr: stderr.to_string(),
    }
}

impl InstallSimulator for FakeHelm {
    fn run(&self, chart: &LoadedChart, config: &InstallConfig) -> chartflat_helm::Result<Release> {
        self.renders.borrow_mut().push(RenderCall {
            root: chart.root.clone(),
            subcharts: chart.subcharts.len(),
            config: config.clone(),
        });

        let manifest = self
            .manifest
            .clone()
            .ok_or_else(|| failed("helm template", "Error: template: web/templates/svc.yaml:3"))?;

        Ok(Release {
            name: config.release_name.clone(),
            namespace: config.namespace.clone(),
            manifest,
        })
    }
}

impl DependencyManager for FakeHelm {
    fn update(&self, chart_root: &Path, progress: &mut dyn Write) -> chartflat_helm::Result<()> {
        self.updates.borrow_mut().push(chart_root.to_path_buf());

        if let Some(stderr) = &self.dependency_error {
            return Err(failed("helm dependency update", stderr));
        }

        for name in &self.vendors {
            let dir = chart_root.join("charts").join(name);
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("Chart.yaml"), format!("name: {name}\nversion: 1.0.0\n"))?;
        }

        progress.write_all(self.progress.as_bytes())?;
        Ok(())
    }
}

/// Writer that rejects every write
pub struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Write a chart skeleton with the given Chart.yaml
pub fn write_chart(root: &Path, chart_yaml: &str) {
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::write(root.join("Chart.yaml"), chart_yaml).unwrap();
    fs::write(root.join("values.yaml"), "replicas: 1\n").unwrap();
    fs::write(
        root.join("templates/deployment.yaml"),
        "kind: Deployment\nmetadata:\n  name: {{ .Release.Name }}\n",
    )
    .unwrap();
}
