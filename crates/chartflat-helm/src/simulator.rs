//! Simulated installs

use std::ffi::OsString;

use chartflat_core::LoadedChart;

use crate::binary::HelmBinary;
use crate::error::{HelmError, Result};
use crate::release::{InstallConfig, Release};

/// Performs a dry-run install of a chart and returns the would-be release
pub trait InstallSimulator {
    fn run(&self, chart: &LoadedChart, config: &InstallConfig) -> Result<Release>;
}

impl<T: InstallSimulator + ?Sized> InstallSimulator for &T {
    fn run(&self, chart: &LoadedChart, config: &InstallConfig) -> Result<Release> {
        (**self).run(chart, config)
    }
}

impl<T: InstallSimulator + ?Sized> InstallSimulator for Box<T> {
    fn run(&self, chart: &LoadedChart, config: &InstallConfig) -> Result<Release> {
        (**self).run(chart, config)
    }
}

/// `helm template` is Helm's client-only dry-run install.
///
/// `--no-hooks` keeps hook resources out so stdout matches the release
/// manifest.
impl InstallSimulator for HelmBinary {
    fn run(&self, chart: &LoadedChart, config: &InstallConfig) -> Result<Release> {
        if !config.dry_run || !config.client_only {
            return Err(HelmError::Unsupported {
                message: "helm backend only performs client-only dry runs".to_string(),
            });
        }

        let args = template_args(chart, config);
        let stdout = self.execute(&args)?;
        let manifest = String::from_utf8(stdout).map_err(|e| HelmError::InvalidOutput {
            command: self.command_line(&args),
            message: e.to_string(),
        })?;

        Ok(Release {
            name: config.release_name.clone(),
            namespace: config.namespace.clone(),
            manifest,
        })
    }
}

fn template_args(chart: &LoadedChart, config: &InstallConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "template".into(),
        config.release_name.clone().into(),
        chart.root.clone().into(),
        "--namespace".into(),
        config.namespace.clone().into(),
        "--no-hooks".into(),
    ];

    if config.include_crds {
        args.push("--include-crds".into());
    }

    if let Some(version) = &config.kube_version {
        args.push("--kube-version".into());
        args.push(version.clone().into());
    }

    args
}
