//! Convert command - flatten charts and YAML into one manifest stream

use std::io::Write;
use std::path::PathBuf;

use chartflat_convert::{ConvertOutcome, ManifestConverter, append_document};
use chartflat_helm::HelmBinary;

use crate::config::CliConfig;
use crate::display;
use crate::error::{CliError, Result};

pub struct ConvertArgs {
    pub paths: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub kube_version: Option<String>,
    pub helm: Option<PathBuf>,
    pub skip_refresh: bool,
    pub strict: bool,
}

pub fn run(args: ConvertArgs, config: &CliConfig) -> Result<()> {
    let kube_version = super::resolve_kube_version(args.kube_version.as_deref(), config)?;

    let helm = HelmBinary::new(args.helm.unwrap_or_else(|| config.helm_binary.clone()))
        .skip_refresh(args.skip_refresh || config.skip_refresh)
        .forward_output(config.forward_dependency_output);
    tracing::debug!(
        "Using {} with kube version {:?}",
        helm.program().display(),
        kube_version
    );
    let converter = ManifestConverter::helm(helm);

    // Nothing reaches the output unless every path converts
    let mut stream = Vec::new();
    for path in &args.paths {
        let mut buffer = Vec::new();
        let outcome = converter.convert(path, &kube_version, &mut buffer)?;
        display::print_outcome(path, &outcome, buffer.len());

        if let ConvertOutcome::Unsupported { path } = &outcome {
            if args.strict {
                return Err(CliError::unsupported(path));
            }
        }

        append_document(&mut stream, &buffer);
    }

    match &args.output {
        Some(file) => {
            std::fs::write(file, &stream).map_err(|e| CliError::Io {
                message: format!("Failed to write {}: {}", file.display(), e),
            })?;
            display::print_written(file, stream.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&stream)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
