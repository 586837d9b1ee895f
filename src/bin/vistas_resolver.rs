//! vistas-resolver - Merges flat network documents
//!
//! Every channel occurrence gets the next multicast endpoint of its type;
//! the merged registry is written unless an error was found.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platform_resolver::driver::{resolve_network, write_report};
use platform_resolver::ResolverConfig;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "vistas-resolver", version, about = "Merges flat network documents")]
struct Cli {
    /// YAML file overriding the base endpoint of channel types
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write each input back as <name>_resolved.<ext> with its endpoints
    #[arg(long)]
    write_resolved: bool,

    /// Write the findings as JSON to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Merged document to write
    output: PathBuf,

    /// Documents to merge, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> platform_resolver::Result<bool> {
    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    let summary = resolve_network(
        &cli.inputs,
        &cli.output,
        config.allocator(),
        cli.write_resolved,
    )?;
    if let Some(path) = &cli.report {
        write_report(&summary.report, path)?;
    }
    Ok(summary.succeeded())
}
