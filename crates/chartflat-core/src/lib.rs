//! Chartflat Core - chart model and pure helpers for the manifest pipeline
//!
//! This crate holds the pieces of the pipeline that need no external tools:
//! - `LoadedChart`: a snapshot of a Helm chart directory (Chart.yaml + layout)
//! - `detect`: best-effort probe deciding whether a directory is a chart root
//! - `version`: semantic-version extraction from kubeVersion constraints
//! - `sanitize`: removal of `%!s(<nil>)` residue from rendered manifests

pub mod chart;
pub mod detect;
pub mod error;
pub mod sanitize;
pub mod version;

pub use chart::{ChartDependency, ChartMetadata, LoadedChart};
pub use detect::{CHART_FILE_NAMES, ChartProbe, chart_root_for, detect_chart, is_chart};
pub use error::{CoreError, Result};
pub use sanitize::clean_nil_values;
pub use version::{effective_kube_version, extract_semver, parse_kube_version};
