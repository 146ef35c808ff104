//! # Schema and Payload Validation
//!
//! Thin adapters over the `jsonschema` crate.
//!
//! - [`validate_schema`] checks that a document is itself a valid JSON
//!   Schema. The draft is taken from its `$schema` keyword, defaulting to
//!   Draft 2020-12.
//! - [`validate_payload`] checks a payload against a schema and collects
//!   every violation, in the engine's enumeration order, as an [`Issue`].
//!
//! ## Reference resolution
//!
//! Schemas are validated offline. Internal `$ref`s (`#/$defs/...`) and the
//! bundled draft meta-schemas resolve natively; any other `$ref` target is
//! refused by [`OfflineRetriever`] and reported as a schema error.

use cval_core::{Issue, ValidationResult};
use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// The schema document is not a valid JSON Schema.
///
/// `message` preserves the engine's description; `issues` locates the
/// problem inside the schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid schema: {message}")]
pub struct SchemaValidationError {
    /// Engine-provided description of the problem.
    pub message: String,
    /// The problem as issues located within the schema document.
    pub issues: Vec<Issue>,
}

/// The payload violates one or more constraints of the schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("payload violates the schema ({} issue(s))", .issues.len())]
pub struct ContractValidationError {
    /// Every violation found, in enumeration order. Never empty.
    pub issues: Vec<Issue>,
}

/// Errors returned by [`validate_payload`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadValidationError {
    /// The schema could not be compiled, so the payload was not checked.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The payload was checked and found in violation.
    #[error(transparent)]
    Contract(#[from] ContractValidationError),
}

impl SchemaValidationError {
    fn from_engine(err: &jsonschema::ValidationError<'_>, schema: &Value) -> Self {
        let message = err.to_string();
        let pointer = err.instance_path.to_string();
        Self {
            issues: vec![Issue::from_pointer(message.clone(), &pointer, schema)],
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Reference retrieval
// ---------------------------------------------------------------------------

/// Retriever that refuses every external `$ref` target.
///
/// Keeps validation a pure function of the supplied schema: no network or
/// filesystem access happens on behalf of a `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!(
            "external reference {} is not resolved; embed the definition in the schema",
            uri.as_str()
        )
        .into())
    }
}

/// Compile `schema` into a validator, checking it against its meta-schema.
fn compile(schema: &Value) -> Result<Validator, SchemaValidationError> {
    jsonschema::options()
        .with_retriever(OfflineRetriever)
        .build(schema)
        .map_err(|err| SchemaValidationError::from_engine(&err, schema))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Confirm that `schema` is a valid JSON Schema document.
///
/// # Errors
///
/// Returns [`SchemaValidationError`] when the document does not conform to
/// the meta-schema of its draft or cannot otherwise be compiled.
pub fn validate_schema(schema: &Value) -> Result<(), SchemaValidationError> {
    compile(schema)?;
    tracing::debug!("schema conforms to its meta-schema");
    Ok(())
}

/// Validate `payload` against `schema`, collecting every violation.
///
/// Returns a passing [`ValidationResult`] when the payload conforms.
///
/// # Errors
///
/// Returns [`PayloadValidationError::Contract`] with all issues when the
/// payload violates the schema, or [`PayloadValidationError::Schema`] if the
/// schema itself cannot be compiled.
pub fn validate_payload(
    payload: &Value,
    schema: &Value,
) -> Result<ValidationResult, PayloadValidationError> {
    let validator = compile(schema)?;

    let issues: Vec<Issue> = validator
        .iter_errors(payload)
        .map(|err| Issue::from_pointer(err.to_string(), &err.instance_path.to_string(), payload))
        .collect();

    if issues.is_empty() {
        Ok(ValidationResult::passed())
    } else {
        tracing::debug!(count = issues.len(), "payload violates schema");
        Err(ContractValidationError { issues }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cval_core::PathSegment;
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

    fn contract(err: PayloadValidationError) -> ContractValidationError {
        match err {
            PayloadValidationError::Contract(err) => err,
            other => panic!("expected contract error, got: {other}"),
        }
    }

    #[test]
    fn valid_schema_passes() {
        validate_schema(&person_schema()).unwrap();
    }

    #[test]
    fn schema_without_dollar_schema_uses_default_draft() {
        validate_schema(&json!({"type": "array", "items": {"type": "number"}})).unwrap();
    }

    #[test]
    fn boolean_schema_is_valid() {
        validate_schema(&json!(true)).unwrap();
    }

    #[test]
    fn unknown_type_is_rejected() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {"value": {"type": "does_not_exist"}}
        });
        let err = validate_schema(&schema).unwrap_err();
        assert!(!err.message.is_empty());
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].message(), err.message);
        assert_eq!(
            err.issues[0].path(),
            &[
                PathSegment::from("properties"),
                PathSegment::from("value"),
                PathSegment::from("type"),
            ]
        );
    }

    #[test]
    fn schema_error_display_carries_engine_message() {
        let err = validate_schema(&json!({"minimum": "zero"})).unwrap_err();
        assert!(err.to_string().starts_with("invalid schema: "));
        assert!(err.to_string().contains(&err.message));
    }

    #[test]
    fn conforming_payload_passes() {
        let result = validate_payload(&json!({"name": "Jess", "age": 33}), &person_schema()).unwrap();
        assert!(result.success);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn missing_required_property_is_a_root_issue() {
        let err = validate_payload(&json!({"age": 10}), &person_schema()).unwrap_err();
        let err = contract(err);
        let required = err
            .issues
            .iter()
            .find(|i| i.message().contains("is a required property"))
            .expect("required-property issue");
        assert!(required.message().contains("name"));
        assert!(required.is_root());
    }

    #[test]
    fn every_violation_is_collected() {
        let err = validate_payload(
            &json!({"name": 4, "age": -1, "extra": true}),
            &person_schema(),
        )
        .unwrap_err();
        let err = contract(err);
        assert!(err.issues.len() >= 3, "got: {:?}", err.issues);

        let paths: Vec<&[PathSegment]> = err.issues.iter().map(|i| i.path()).collect();
        assert!(paths.contains(&[PathSegment::Key("name".into())].as_slice()));
        assert!(paths.contains(&[PathSegment::Key("age".into())].as_slice()));
    }

    #[test]
    fn array_violation_paths_use_indices() {
        let schema = json!({"type": "array", "items": {"type": "integer"}});
        let err = validate_payload(&json!([1, "two", 3]), &schema).unwrap_err();
        let err = contract(err);
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path(), &[PathSegment::Index(1)]);
    }

    #[test]
    fn uncompilable_schema_is_reported_as_schema_error() {
        let err = validate_payload(&json!({}), &json!({"type": 12})).unwrap_err();
        assert!(matches!(err, PayloadValidationError::Schema(_)), "got: {err}");
    }

    #[test]
    fn external_refs_are_not_fetched() {
        let schema = json!({"$ref": "https://example.invalid/remote.schema.json"});
        let err = validate_schema(&schema).unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn internal_refs_resolve() {
        let schema = json!({
            "$defs": {"positive": {"type": "integer", "exclusiveMinimum": 0}},
            "type": "object",
            "properties": {"count": {"$ref": "#/$defs/positive"}}
        });
        validate_schema(&schema).unwrap();
        assert!(validate_payload(&json!({"count": 2}), &schema).is_ok());
        assert!(validate_payload(&json!({"count": 0}), &schema).is_err());
    }

    #[test]
    fn contract_error_display_counts_issues() {
        let err = ContractValidationError {
            issues: vec![Issue::at_root("a"), Issue::at_root("b")],
        };
        assert_eq!(err.to_string(), "payload violates the schema (2 issue(s))");
    }
}
