//! Dry-run rendering of a loaded chart

use chartflat_core::{LoadedChart, effective_kube_version};

use crate::error::{HelmError, Result};
use crate::release::InstallConfig;
use crate::simulator::InstallSimulator;

/// Renders a chart by simulating an install of it
#[derive(Debug, Clone)]
pub struct ChartRenderer<S> {
    simulator: S,
}

impl<S: InstallSimulator> ChartRenderer<S> {
    pub fn new(simulator: S) -> Self {
        Self { simulator }
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Render `chart` into manifest bytes.
    ///
    /// The release is named after the chart and installed into `default`
    /// with CRDs, no cluster contact and no value overrides. A version
    /// extracted from the chart's `kubeVersion` overrides
    /// `default_kube_version`. The manifest is trimmed; failures are not
    /// retried.
    pub fn render(&self, chart: &LoadedChart, default_kube_version: &str) -> Result<Vec<u8>> {
        let kube_version = effective_kube_version(
            default_kube_version,
            chart.metadata.kube_version_constraint(),
        );

        tracing::debug!(
            "Dry-running chart {} (kube version: {})",
            chart.name(),
            kube_version.as_deref().unwrap_or("renderer default")
        );

        let config = InstallConfig::dry_run(chart.name()).with_kube_version(kube_version);
        let release = self
            .simulator
            .run(chart, &config)
            .map_err(|e| HelmError::DryRun {
                chart: chart.name().to_string(),
                source: Box::new(e),
            })?;

        Ok(release.manifest.trim().as_bytes().to_vec())
    }
}
