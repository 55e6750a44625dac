//! Error types for Helm operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelmError {
    #[error("Failed to run {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("`{command}` produced invalid output: {message}")]
    InvalidOutput { command: String, message: String },

    #[error("Unsupported install configuration: {message}")]
    Unsupported { message: String },

    /// The dry-run install of a chart failed
    #[error("Dry run of chart '{chart}' failed: {source}")]
    DryRun {
        chart: String,
        #[source]
        source: Box<HelmError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HelmError>;
