//! ims-resolver - Merges hierarchical platform documents
//!
//! Reads every input in order, folds them into one platform and writes it
//! to the output path unless an error was found.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platform_resolver::driver::{resolve_platform, write_report};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "ims-resolver", version, about = "Merges hierarchical platform documents")]
struct Cli {
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
    let summary = resolve_platform(&cli.inputs, &cli.output)?;
    if let Some(path) = &cli.report {
        write_report(&summary.report, path)?;
    }
    Ok(summary.succeeded())
}
