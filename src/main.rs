//! Vibescan - heuristic AI-authorship estimator CLI
//!
//! Thin wrapper over the library: parses arguments, initialises
//! logging, and hands off to `cli::run`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = vibescan::cli::Cli::parse();

    // RUST_LOG wins over the --log-level flag
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    vibescan::cli::run(cli)
}
