//! Display formatting for CLI output
//!
//! Conversion summaries go to stderr so stdout carries only manifests.

use std::path::Path;

use chartflat_convert::ConvertOutcome;
use console::style;

use crate::commands::inspect::{InspectReport, PathKind};

/// One summary line per converted path
pub fn print_outcome(path: &Path, outcome: &ConvertOutcome, bytes: usize) {
    match outcome {
        ConvertOutcome::Chart { root } => eprintln!(
            "{} {} {}",
            style("✓").green().bold(),
            style(root.display()).cyan(),
            style(format!("(chart, {bytes} bytes)")).dim()
        ),
        ConvertOutcome::Manifests { files } => eprintln!(
            "{} {} {}",
            style("✓").green().bold(),
            style(path.display()).cyan(),
            style(format!("({files} file(s), {bytes} bytes)")).dim()
        ),
        ConvertOutcome::Unsupported { path } => eprintln!(
            "{} {} {}",
            style("⚠").yellow(),
            style(path.display()).yellow(),
            style("is neither a chart nor YAML, skipped").dim()
        ),
    }
}

pub fn print_written(file: &Path, bytes: usize) {
    eprintln!(
        "{} Wrote {} bytes to {}",
        style("→").blue(),
        bytes,
        style(file.display()).green()
    );
}

/// Human-readable `inspect` output
pub fn print_report(report: &InspectReport) {
    let kind = match report.kind {
        PathKind::Chart => "Helm chart",
        PathKind::Directory => "directory of manifests",
        PathKind::Yaml => "manifest file",
        PathKind::Unsupported => "unsupported (nothing to convert)",
    };
    println!("{}: {}", style(report.path.display()).cyan().bold(), kind);

    let Some(chart) = &report.chart else {
        return;
    };

    println!();
    println!("{}: {}", style("Name").bold(), chart.name);
    println!("{}: {}", style("Version").bold(), chart.version);
    println!("{}: {}", style("Root").bold(), chart.root.display());
    println!(
        "{}: {}",
        style("Kube Version").bold(),
        chart.kube_version_constraint.as_deref().unwrap_or("(any)")
    );
    println!(
        "{}: {}",
        style("Renders For").bold(),
        chart
            .effective_kube_version
            .as_deref()
            .unwrap_or("(helm default)")
    );

    if !chart.dependencies.is_empty() {
        println!();
        println!("{}:", style("Dependencies").bold());
        for dep in &chart.dependencies {
            let marker = if dep.vendored {
                style("✓").green()
            } else {
                style("↓").yellow()
            };
            match &dep.repository {
                Some(repo) => println!("  {} {} {} ({})", marker, dep.name, dep.version, repo),
                None => println!("  {} {} {}", marker, dep.name, dep.version),
            }
        }
    }

    if !chart.subcharts.is_empty() {
        println!();
        println!("{}:", style("Vendored").bold());
        for sub in &chart.subcharts {
            println!("  - {sub}");
        }
    }
}
