//! # cval CLI entry point
//!
//! Parses command-line arguments, installs the stderr log subscriber, and
//! hands off to the validate handler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cval_cli::{execute, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level. stdout is reserved for the result.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cval v{} starting", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ExitCode::from(execute(&cli, &mut out))
}
