//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Chart not found: {path}")]
    ChartNotFound { path: PathBuf },

    #[error("Invalid chart at {path}: {message}")]
    InvalidChart { path: PathBuf, message: String },

    #[error("Failed to parse {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required field '{field}' in {}", path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("Invalid Kubernetes version '{input}': {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: semver::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
