//! # Document Loading
//!
//! Reads a schema, payload, or request document from disk. The format is
//! chosen by file extension: `.yaml`/`.yml` files are parsed as YAML, every
//! other file as JSON. Files are decoded as UTF-8.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// A document file could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentLoadError {
    /// The file could not be read or is not valid UTF-8.
    #[error("cannot read {path}: {reason}")]
    Read {
        /// Path to the document.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The file contents are not valid JSON or YAML.
    #[error("invalid {format} in {path}: {reason}")]
    Parse {
        /// Path to the document.
        path: String,
        /// `"JSON"` or `"YAML"`.
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Whether `path` names a YAML document.
fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`DocumentLoadError::Read`] if the file is missing, unreadable, or
/// not UTF-8, and [`DocumentLoadError::Parse`] if its contents do not parse.
pub fn read_document(path: &Path) -> Result<Value, DocumentLoadError> {
    tracing::debug!(path = %path.display(), "reading document");

    let content = std::fs::read_to_string(path).map_err(|e| DocumentLoadError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| DocumentLoadError::Parse {
            path: path.display().to_string(),
            format: "YAML",
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| DocumentLoadError::Parse {
            path: path.display().to_string(),
            format: "JSON",
            reason: e.to_string(),
        })
    }
}
