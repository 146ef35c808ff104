//! # Validate Command
//!
//! Builds [`RunParameters`] from the command line, runs the validation, and
//! prints the [`RunResult`].
//!
//! ## Sources
//!
//! A request file (`--request`) supplies a whole `{"parameters": {...}}`
//! envelope. Any slot flag (`--schema`, `--schema-json`, `--payload`,
//! `--payload-json`) replaces that slot's sources from the envelope. Within
//! a slot, inline JSON wins over a path.
//!
//! ## Output
//!
//! With `--json`, stdout is one compact JSON object:
//! `{"status": ..., "issues": [{"message": ..., "path": [...]}], "error_type": ...}`.
//! Without it, a short human-readable summary is printed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use cval_core::RunResult;
use cval_schema::{read_document, run, RunParameters, RunRequest};

use crate::{EXIT_FAILURE, EXIT_SUCCESS};

/// Arguments for a validation run.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Path to the JSON Schema document (JSON, or YAML by extension).
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Path to the payload document (JSON, or YAML by extension).
    #[arg(long, value_name = "PATH")]
    pub payload: Option<PathBuf>,

    /// Inline JSON Schema document. Takes precedence over --schema.
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub schema_json: Option<Value>,

    /// Inline payload document. Takes precedence over --payload.
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub payload_json: Option<Value>,

    /// Read a `{"parameters": {...}}` request envelope from a file.
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Output machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_json(raw: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

/// Execute a validation run.
///
/// Returns exit code: 0 on success, 1 on validation failure. An `Err` means
/// the run could not be attempted (unusable request file or broken stdout).
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write) -> Result<u8> {
    let parameters = build_parameters(args)?;
    let result = run(&RunRequest::new(parameters));

    if args.json {
        write_json(&result, out)?;
    } else {
        write_summary(&result, out)?;
    }

    Ok(if result.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

/// Merge the request envelope (if any) with the slot flags.
fn build_parameters(args: &ValidateArgs) -> Result<RunParameters> {
    let mut parameters = match &args.request {
        Some(path) => {
            let envelope = read_document(path).context("failed to load request file")?;
            let request: RunRequest = serde_json::from_value(envelope).with_context(|| {
                format!(
                    "request file {} must contain a `parameters` mapping",
                    path.display()
                )
            })?;
            request.parameters
        }
        None => RunParameters::default(),
    };

    if args.schema.is_some() || args.schema_json.is_some() {
        parameters.schema = args.schema_json.clone();
        parameters.schema_path = args.schema.clone();
    }
    if args.payload.is_some() || args.payload_json.is_some() {
        parameters.payload = args.payload_json.clone();
        parameters.payload_path = args.payload.clone();
    }

    Ok(parameters)
}

fn write_json(result: &RunResult, out: &mut impl Write) -> Result<()> {
    let line = serde_json::to_string(result).context("failed to serialize result")?;
    writeln!(out, "{line}").context("failed to write result")?;
    Ok(())
}

fn write_summary(result: &RunResult, out: &mut impl Write) -> Result<()> {
    match result.error_type() {
        None => writeln!(out, "OK: payload conforms to schema")?,
        Some(error_type) => {
            writeln!(
                out,
                "FAIL ({error_type}): {} issue(s)",
                result.issues().len()
            )?;
            for issue in result.issues() {
                writeln!(out, "  {issue}")?;
            }
        }
    }
    Ok(())
}
