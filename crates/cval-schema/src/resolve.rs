//! # Input Resolution
//!
//! Turns [`RunParameters`] into concrete JSON values for the schema and
//! payload slots. Each slot accepts an inline value or a file path; when
//! both are present the inline value wins and the path is ignored.
//!
//! Failures are tagged with the slot they belong to so the orchestrator can
//! report them under the matching [`ErrorType`].

use std::path::{Path, PathBuf};

use cval_core::ErrorType;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::{read_document, DocumentLoadError};

/// Sources for the schema and payload of one run.
///
/// An inline key that is present is always a value, even when it holds JSON
/// `null`; only a missing key leaves the slot to its path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Inline schema document.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema: Option<Value>,
    /// Path to a schema file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,
    /// Inline payload document.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Value>,
    /// Path to a payload file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_path: Option<PathBuf>,
}

/// Keep a present key as `Some`, so `null` reaches validation like any other value.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RunParameters {
    /// Parameters with both documents supplied inline.
    pub fn inline(schema: Value, payload: Value) -> Self {
        Self {
            schema: Some(schema),
            payload: Some(payload),
            ..Self::default()
        }
    }

    /// Parameters with both documents read from files.
    pub fn from_paths(schema_path: impl Into<PathBuf>, payload_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: Some(schema_path.into()),
            payload_path: Some(payload_path.into()),
            ..Self::default()
        }
    }
}

/// A slot could not be resolved to a JSON value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Neither an inline value nor a path was supplied.
    #[error("no {slot} supplied: provide `{slot}` inline or `{slot}_path`")]
    Missing {
        /// The unresolved slot.
        slot: ErrorType,
    },

    /// The slot's file could not be loaded.
    #[error("{slot} could not be loaded: {source}")]
    Load {
        /// The unresolved slot.
        slot: ErrorType,
        /// Underlying load failure.
        #[source]
        source: DocumentLoadError,
    },
}

impl ResolutionError {
    /// The slot that failed to resolve.
    pub fn slot(&self) -> ErrorType {
        match self {
            Self::Missing { slot } | Self::Load { slot, .. } => *slot,
        }
    }
}

/// Concrete documents for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    /// The schema document.
    pub schema: Value,
    /// The payload document.
    pub payload: Value,
}

/// Resolve one slot from its inline value or path.
fn resolve_slot(
    slot: ErrorType,
    inline: Option<&Value>,
    path: Option<&Path>,
) -> Result<Value, ResolutionError> {
    match (inline, path) {
        (Some(value), shadowed) => {
            if let Some(path) = shadowed {
                tracing::debug!(
                    %slot,
                    path = %path.display(),
                    "inline value supplied; ignoring path"
                );
            }
            Ok(value.clone())
        }
        (None, Some(path)) => {
            read_document(path).map_err(|source| ResolutionError::Load { slot, source })
        }
        (None, None) => Err(ResolutionError::Missing { slot }),
    }
}

/// Resolve the schema, then the payload.
///
/// # Errors
///
/// Returns the first [`ResolutionError`] encountered; the schema slot is
/// checked before the payload slot.
pub fn resolve_inputs(params: &RunParameters) -> Result<ResolvedInputs, ResolutionError> {
    let schema = resolve_slot(
        ErrorType::Schema,
        params.schema.as_ref(),
        params.schema_path.as_deref(),
    )?;
    let payload = resolve_slot(
        ErrorType::Payload,
        params.payload.as_ref(),
        params.payload_path.as_deref(),
    )?;
    Ok(ResolvedInputs { schema, payload })
}
