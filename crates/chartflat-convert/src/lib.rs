//! Chartflat Convert - Helm charts and YAML trees to one manifest stream
//!
//! Given a path, [`ManifestConverter`] decides what it is looking at:
//!
//! - a chart root (or a file inside one): the chart's dependencies are
//!   fetched, the chart is dry-run installed and the cleaned-up release
//!   manifest is written out
//! - a directory or YAML/JSON file: every file is re-encoded as YAML and
//!   written out followed by a `---` line
//! - anything else: nothing is written ([`ConvertOutcome::Unsupported`])
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let mut out = Vec::new();
//! let outcome = chartflat_convert::convert(Path::new("./deploy"), "1.29.0", &mut out)?;
//! println!("{outcome:?}: {} bytes", out.len());
//! # Ok::<(), chartflat_convert::ConvertError>(())
//! ```

pub mod converter;
pub mod error;
pub mod loader;
pub mod sink;
pub mod yaml;

#[cfg(test)]
mod testing;

pub use converter::{ConvertOutcome, ManifestConverter, convert};
pub use error::{ChartLoadCause, ConvertError, Result};
pub use loader::ChartLoader;
pub use sink::{DOCUMENT_SEPARATOR, append_document, write_document};
pub use yaml::{NormalizeError, is_yaml_like, to_yaml};
