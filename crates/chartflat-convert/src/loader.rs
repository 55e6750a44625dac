//! Chart loading pipeline
//!
//! load metadata -> fetch dependencies -> reload -> dry run -> clean -> write

use std::io::Write;
use std::path::Path;

use chartflat_core::{LoadedChart, clean_nil_values};
use chartflat_helm::{ChartRenderer, DependencyManager, InstallSimulator};

use crate::error::{ChartLoadCause, ConvertError, Result};

/// Turns a chart directory into rendered, cleaned manifests
#[derive(Debug, Clone)]
pub struct ChartLoader<S, D> {
    renderer: ChartRenderer<S>,
    dependencies: D,
}

impl<S: InstallSimulator, D: DependencyManager> ChartLoader<S, D> {
    pub fn new(simulator: S, dependencies: D) -> Self {
        Self {
            renderer: ChartRenderer::new(simulator),
            dependencies,
        }
    }

    pub fn renderer(&self) -> &ChartRenderer<S> {
        &self.renderer
    }

    pub fn dependencies(&self) -> &D {
        &self.dependencies
    }

    /// Render the chart rooted at `path` into `sink`.
    ///
    /// The caller has already established that `path` is a chart root.
    /// Declared dependencies are downloaded first (progress goes to `sink`)
    /// and any download failure is terminal. Nothing is written to `sink`
    /// unless the render succeeds, apart from that progress text.
    pub fn load(&self, path: &Path, sink: &mut dyn Write, default_kube_version: &str) -> Result<()> {
        let fail = |cause: ChartLoadCause| ConvertError::LoadHelmChart {
            path: path.to_path_buf(),
            cause,
        };

        let chart = LoadedChart::load(path).map_err(|e| fail(e.into()))?;

        let chart = if chart.has_dependencies() {
            tracing::debug!(
                "Chart {} declares {} dependencies, updating",
                chart.name(),
                chart.metadata.dependencies.len()
            );
            self.dependencies
                .update(path, sink)
                .map_err(|e| fail(ChartLoadCause::Dependencies(e)))?;

            // charts/ changed on disk, the first snapshot is stale
            LoadedChart::load(path).map_err(|e| fail(e.into()))?
        } else {
            chart
        };

        let rendered = self
            .renderer
            .render(&chart, default_kube_version)
            .map_err(|e| fail(ChartLoadCause::Render(e)))?;

        let manifests = clean_nil_values(&rendered);
        sink.write_all(&manifests)
            .map_err(ConvertError::WriteManifests)?;

        tracing::debug!(
            "Wrote {} bytes of manifests for chart {}",
            manifests.len(),
            chart.name()
        );
        Ok(())
    }
}
