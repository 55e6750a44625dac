//! CLI error types with exit code handling
//!
//! Library errors are folded into one diagnostic type so every failure is
//! reported the same way and maps onto a stable exit code.

use std::path::Path;

use chartflat_convert::{ChartLoadCause, ConvertError};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The chart could not be rendered
    #[error("Render error: {message}")]
    #[diagnostic(code(chartflat::cli::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart metadata or dependency error
    #[error("Chart error: {message}")]
    #[diagnostic(code(chartflat::cli::chart))]
    Chart {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A manifest file is not a YAML/JSON mapping
    #[error("Invalid manifest: {message}")]
    #[diagnostic(
        code(chartflat::cli::manifest),
        help("Every document must be a YAML or JSON mapping")
    )]
    Manifest { message: String },

    /// Input that is neither a chart nor YAML, rejected under --strict
    #[error("Nothing to convert at {path}")]
    #[diagnostic(
        code(chartflat::cli::unsupported),
        help("Pass a chart directory, a YAML/JSON file or a directory of them")
    )]
    Unsupported { path: String },

    /// Config file could not be read or parsed
    #[error("Config error: {message}")]
    #[diagnostic(code(chartflat::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Invalid arguments or options
    #[error("{message}")]
    #[diagnostic(code(chartflat::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartflat::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render { .. } => exit_codes::RENDER_ERROR,
            CliError::Chart { .. } => exit_codes::CHART_ERROR,
            CliError::Manifest { .. } => exit_codes::ERROR,
            CliError::Unsupported { .. } => exit_codes::ERROR,
            CliError::Config { .. } => exit_codes::ERROR,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create a chart error
    pub fn chart(message: impl Into<String>) -> Self {
        Self::Chart {
            message: message.into(),
            help: None,
        }
    }

    pub fn unsupported(path: &Path) -> Self {
        Self::Unsupported {
            path: path.display().to_string(),
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a config error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        let message = err.to_string();
        match &err {
            ConvertError::ReadDir { .. }
            | ConvertError::ReadFile { .. }
            | ConvertError::WriteFile { .. }
            | ConvertError::WriteManifests(_) => CliError::Io { message },
            ConvertError::InvalidYaml { .. } => CliError::Manifest { message },
            ConvertError::LoadHelmChart { cause, .. } => match cause {
                ChartLoadCause::Chart(_) => CliError::Chart {
                    message,
                    help: Some("Chart.yaml needs at least a name and a version".to_string()),
                },
                ChartLoadCause::Dependencies(_) => CliError::Chart {
                    message,
                    help: Some(
                        "Check that the dependency repositories are reachable, \
                         or vendor the charts under charts/"
                            .to_string(),
                    ),
                },
                ChartLoadCause::Render(_) => CliError::Render {
                    message,
                    help: Some(
                        "Use --debug to see the helm command line, or pick another \
                         --kube-version"
                            .to_string(),
                    ),
                },
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
