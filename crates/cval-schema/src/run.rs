//! # Run Orchestrator
//!
//! Wires resolution, schema validation, and payload validation into a
//! single [`RunResult`]. Every stage failure is terminal for the run:
//!
//! | Stage that failed | `error_type`      | `issues`                          |
//! |-------------------|-------------------|-----------------------------------|
//! | resolution        | slot that failed  | one root issue describing the I/O |
//! | schema            | `schema`          | located inside the schema         |
//! | payload           | `payload`         | every violation, engine order     |
//!
//! Validation outcomes never surface as `Err`. Only a malformed request
//! envelope handed to [`run_value`] does.

use cval_core::{ErrorType, Issue, RunResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resolve::{resolve_inputs, RunParameters};
use crate::validate::{validate_payload, validate_schema, PayloadValidationError};

/// A validation request: the `{"parameters": {...}}` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Schema and payload sources.
    pub parameters: RunParameters,
}

impl RunRequest {
    /// Wrap parameters in a request.
    pub fn new(parameters: RunParameters) -> Self {
        Self { parameters }
    }
}

/// The request envelope itself is unusable.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The envelope has no `parameters` object.
    #[error("request must be an object with a `parameters` mapping")]
    MissingParameters,

    /// The `parameters` mapping has entries of the wrong shape.
    #[error("malformed `parameters` mapping: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Execute one validation run.
pub fn run(request: &RunRequest) -> RunResult {
    let inputs = match resolve_inputs(&request.parameters) {
        Ok(inputs) => inputs,
        Err(err) => {
            tracing::info!(slot = %err.slot(), error = %err, "input resolution failed");
            return RunResult::failure(err.slot(), vec![Issue::at_root(err.to_string())]);
        }
    };

    if let Err(err) = validate_schema(&inputs.schema) {
        tracing::info!(error = %err, "schema rejected");
        return RunResult::failure(ErrorType::Schema, err.issues);
    }

    match validate_payload(&inputs.payload, &inputs.schema) {
        Ok(_) => {
            tracing::info!("payload conforms to schema");
            RunResult::success()
        }
        Err(PayloadValidationError::Contract(err)) => {
            tracing::info!(count = err.issues.len(), "payload rejected");
            RunResult::failure(ErrorType::Payload, err.issues)
        }
        Err(PayloadValidationError::Schema(err)) => {
            tracing::info!(error = %err, "schema rejected");
            RunResult::failure(ErrorType::Schema, err.issues)
        }
    }
}

/// Execute a run from an untyped request envelope.
///
/// # Errors
///
/// Returns [`RequestError`] if `envelope` has no `parameters` object or the
/// mapping cannot be read as [`RunParameters`].
pub fn run_value(envelope: &Value) -> Result<RunResult, RequestError> {
    let parameters = envelope
        .get("parameters")
        .filter(|p| p.is_object())
        .ok_or(RequestError::MissingParameters)?;
    let parameters: RunParameters = serde_json::from_value(parameters.clone())?;
    Ok(run(&RunRequest::new(parameters)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cval_core::RunStatus;
    use serde_json::json;

    fn person_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name"],
            "additionalProperties": false
        })
    }

    fn inline(payload: Value) -> RunRequest {
        RunRequest::new(RunParameters::inline(person_schema(), payload))
    }

    #[test]
    fn conforming_payload_succeeds() {
        let result = run(&inline(json!({"name": "Ops"})));
        assert_eq!(result, RunResult::success());
    }

    #[test]
    fn payload_violation_is_payload_failure() {
        let result = run(&inline(json!({"name": 4})));
        assert_eq!(result.status(), RunStatus::Failure);
        assert_eq!(result.error_type(), Some(ErrorType::Payload));
        assert!(!result.issues().is_empty());
    }

    #[test]
    fn invalid_schema_is_schema_failure_and_payload_is_not_checked() {
        let schema = json!({"properties": {"value": {"type": "does_not_exist"}}});
        // The payload would also violate a valid version of this schema.
        let result = run(&RunRequest::new(RunParameters::inline(schema, json!({"value": 1}))));
        assert_eq!(result.error_type(), Some(ErrorType::Schema));
        assert_eq!(result.issues().len(), 1);
    }

    #[test]
    fn missing_payload_is_payload_resolution_failure() {
        let request = RunRequest::new(RunParameters {
            schema: Some(person_schema()),
            ..RunParameters::default()
        });
        let result = run(&request);
        assert_eq!(result.error_type(), Some(ErrorType::Payload));
        assert_eq!(result.issues().len(), 1);
        assert!(result.issues()[0].is_root());
        assert!(result.issues()[0].message().contains("no payload supplied"));
    }

    #[test]
    fn missing_schema_file_is_schema_resolution_failure() {
        let dir = tempfile::tempdir().unwrap();
        let request = RunRequest::new(RunParameters {
            schema_path: Some(dir.path().join("schema.json")),
            payload: Some(json!({})),
            ..RunParameters::default()
        });
        let result = run(&request);
        assert_eq!(result.error_type(), Some(ErrorType::Schema));
        assert!(result.issues()[0].message().starts_with("schema could not be loaded"));
    }

    #[test]
    fn run_value_accepts_envelope() {
        let envelope = json!({
            "parameters": {
                "schema": person_schema(),
                "payload": {"name": "Ops"}
            }
        });
        assert!(run_value(&envelope).unwrap().is_success());
    }

    #[test]
    fn run_value_requires_parameters() {
        let err = run_value(&json!({"schema": {}})).unwrap_err();
        assert!(matches!(err, RequestError::MissingParameters));

        let err = run_value(&json!({"parameters": "nope"})).unwrap_err();
        assert!(matches!(err, RequestError::MissingParameters));
    }

    #[test]
    fn run_value_rejects_malformed_parameters() {
        let err = run_value(&json!({"parameters": {"schema_path": 42}})).unwrap_err();
        assert!(matches!(err, RequestError::Malformed(_)), "got: {err}");
    }

    #[test]
    fn request_deserializes_from_envelope() {
        let request: RunRequest = serde_json::from_value(json!({
            "parameters": {"schema_path": "s.json", "payload_path": "p.json"}
        }))
        .unwrap();
        assert_eq!(
            request,
            RunRequest::new(RunParameters::from_paths("s.json", "p.json"))
        );
    }
}
