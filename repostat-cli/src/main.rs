//! repostat CLI - renders a browsable statistics site from a repository model

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::Parser;
use repostat_core::{config, Directory, Repository};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repostat")]
#[command(about = "Generate a static HTML statistics report from a version-control repository model")]
#[command(version)]
struct Cli {
    /// Path to the serialized repository model (JSON)
    model: PathBuf,

    /// Output directory for the generated site
    #[arg(long)]
    output: Option<PathBuf>,

    /// Project name shown in report titles
    #[arg(long)]
    name: Option<String>,

    /// Path to a config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.model)
        .with_context(|| format!("failed to read model file {}", cli.model.display()))?;
    let root: Directory = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse model file {}", cli.model.display()))?;
    let repository = Repository::new(root);

    let file_config = match &cli.config {
        Some(path) => Some(config::load_config_file(path)?),
        None => None,
    };
    let report_config = config::ReportConfig::resolve(file_config, cli.output, cli.name);

    let index = repostat_core::generate_report(&repository, &report_config)?;
    eprintln!("Report generated: {}", index.display());
    Ok(())
}
