//! # cval-cli — Contract Validation Command-Line Interface
//!
//! Provides the `cval` binary: validate a payload document against a JSON
//! Schema and report the outcome.
//!
//! ```bash
//! cval --schema schema.json --payload payload.json --json
//! cval --schema-json '{"type": "integer"}' --payload-json '42'
//! cval --request request.yaml
//! ```
//!
//! ## Exit codes
//!
//! - `0`: the payload conforms to the schema.
//! - `1`: validation failed: the schema or payload could not be loaded, the
//!   schema is invalid, or the payload violates it.
//! - `2`: operational error: bad arguments or an unusable request file.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handler in [`validate`].
//! - The handler delegates to `cval-schema` and only inspects the
//!   [`RunResult`](cval_core::RunResult) status to choose an exit code.
//! - stdout carries only the result; diagnostics go to stderr via `tracing`.

pub mod validate;

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;

use crate::validate::{run_validate, ValidateArgs};

/// The payload conforms to the schema.
pub const EXIT_SUCCESS: u8 = 0;
/// Validation failed at some stage.
pub const EXIT_FAILURE: u8 = 1;
/// The run could not be attempted.
pub const EXIT_ERROR: u8 = 2;

/// Validate a JSON payload against a JSON Schema.
///
/// Schema and payload may come from files, from inline JSON on the command
/// line, or from a request envelope. Inline values take precedence over
/// paths for the same slot.
#[derive(Parser, Debug)]
#[command(name = "cval", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose diagnostics on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub validate: ValidateArgs,
}

/// Run a parsed command line, writing the result to `out`.
///
/// Returns the process exit code.
pub fn execute(cli: &Cli, out: &mut impl Write) -> u8 {
    match run_validate(&cli.validate, out) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            EXIT_ERROR
        }
    }
}

/// Parse `argv` (including the program name) and run it.
///
/// Argument errors and `--help`/`--version` are printed by clap and mapped
/// to clap's own exit code.
pub fn run_cli<I, T>(argv: I, out: &mut impl Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(cli) => execute(&cli, out),
        Err(e) => {
            // Printing only fails if the terminal is gone; the exit code still applies.
            let _ = e.print();
            u8::try_from(e.exit_code()).unwrap_or(EXIT_ERROR)
        }
    }
}
