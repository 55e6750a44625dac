//! Chartflat Helm - the rendering side of the manifest pipeline
//!
//! Template expansion and dependency downloads are delegated to Helm. This
//! crate defines the two seams the pipeline talks to:
//!
//! - [`InstallSimulator`]: performs a client-only dry-run install
//! - [`DependencyManager`]: fetches the dependencies a chart declares
//!
//! [`HelmBinary`] implements both by running the `helm` executable.
//! [`ChartRenderer`] sits on top of a simulator and turns a loaded chart
//! into trimmed manifest bytes.
//!
//! # Example
//!
//! ```no_run
//! use chartflat_core::LoadedChart;
//! use chartflat_helm::{ChartRenderer, HelmBinary};
//!
//! let chart = LoadedChart::load("./my-chart")?;
//! let renderer = ChartRenderer::new(HelmBinary::default());
//! let manifest = renderer.render(&chart, "1.29.0")?;
//! println!("{}", String::from_utf8_lossy(&manifest));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod dependency;
pub mod error;
pub mod release;
pub mod renderer;
pub mod simulator;

pub use binary::HelmBinary;
pub use dependency::DependencyManager;
pub use error::{HelmError, Result};
pub use release::{InstallConfig, Release};
pub use renderer::ChartRenderer;
pub use simulator::InstallSimulator;
