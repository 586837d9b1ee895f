//! platform-inverter - Swaps producers and consumers
//!
//! Writes the network and platform documents of the counterpart of a
//! platform: every input becomes an output and the other way round.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platform_resolver::invert::invert_files;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "platform-inverter", version, about = "Swaps producers and consumers")]
struct Cli {
    /// Flat network document
    vistas: PathBuf,
    /// Hierarchical platform document
    cfg: PathBuf,
    /// Inverted network document to write
    inverted_vistas: PathBuf,
    /// Inverted platform document to write
    inverted_cfg: PathBuf,
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
    match invert_files(&cli.vistas, &cli.cfg, &cli.inverted_vistas, &cli.inverted_cfg) {
        Ok(()) => {
            info!("Inversion finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
