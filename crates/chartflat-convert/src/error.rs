//! Error types for manifest conversion

use std::path::PathBuf;
use thiserror::Error;

use chartflat_core::CoreError;
use chartflat_helm::HelmError;

use crate::yaml::NormalizeError;

/// Converter error
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest for {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", path.display())]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: NormalizeError,
    },

    #[error("Failed to load Helm chart at {}: {cause}", path.display())]
    LoadHelmChart {
        path: PathBuf,
        #[source]
        cause: ChartLoadCause,
    },

    /// The rendered chart could not be written to the sink
    #[error("Failed to write manifests to writer: {0}")]
    WriteManifests(#[source] std::io::Error),
}

/// What went wrong while loading a chart
#[derive(Debug, Error)]
pub enum ChartLoadCause {
    #[error(transparent)]
    Chart(#[from] CoreError),

    #[error("failed to download dependencies: {0}")]
    Dependencies(#[source] HelmError),

    #[error(transparent)]
    Render(HelmError),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
