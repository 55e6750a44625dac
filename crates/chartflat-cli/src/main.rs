//! Chartflat CLI - Helm charts and YAML trees to one manifest stream

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
mod config;
mod display;
mod error;
mod exit_codes;

use commands::convert::ConvertArgs;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "chartflat")]
#[command(author = "Chartflat Contributors")]
#[command(version)]
#[command(about = "Flatten Helm charts and YAML trees into one Kubernetes manifest stream", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.config/chartflat/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert charts, YAML files or directories into one manifest stream
    Convert {
        /// Chart directories, YAML/JSON files or directories of them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Kubernetes version to render charts for
        #[arg(long, env = "CHARTFLAT_KUBE_VERSION")]
        kube_version: Option<String>,

        /// helm executable
        #[arg(long, env = "CHARTFLAT_HELM")]
        helm: Option<PathBuf>,

        /// Do not refresh repository indexes when fetching dependencies
        #[arg(long)]
        skip_refresh: bool,

        /// Fail on paths that are neither charts nor YAML
        #[arg(long)]
        strict: bool,
    },

    /// Show how a path would be converted
    Inspect {
        /// Chart directory, YAML/JSON file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Kubernetes version to resolve against
        #[arg(long, env = "CHARTFLAT_KUBE_VERSION")]
        kube_version: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CHARTFLAT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Convert {
            paths,
            output,
            kube_version,
            helm,
            skip_refresh,
            strict,
        } => commands::convert::run(
            ConvertArgs {
                paths,
                output,
                kube_version,
                helm,
                skip_refresh,
                strict,
            },
            &config,
        ),

        Commands::Inspect {
            path,
            kube_version,
            json,
        } => commands::inspect::run(&path, kube_version.as_deref(), json, &config),
    });

    let code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
