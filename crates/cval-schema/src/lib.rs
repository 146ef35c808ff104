//! # cval-schema — Contract Validation
//!
//! Validates JSON payloads against JSON Schema documents and shapes the
//! outcome into a uniform [`RunResult`].
//!
//! ## Pipeline
//!
//! 1. **Resolve** ([`resolve`]): turn inline values or file paths into JSON
//!    values for the schema and payload slots.
//! 2. **Validate the schema** ([`validate::validate_schema`]): confirm the
//!    schema conforms to its meta-schema.
//! 3. **Validate the payload** ([`validate::validate_payload`]): collect
//!    every violation as an [`Issue`](cval_core::Issue).
//! 4. **Assemble** ([`mod@run`]): map the first failing stage into a
//!    [`RunResult`] tagged with the matching [`ErrorType`](cval_core::ErrorType).
//!
//! Constraint evaluation is delegated entirely to the `jsonschema` crate.
//!
//! ## Crate Policy
//!
//! - Depends only on `cval-core` internally.
//! - Validators return typed errors; [`run()`] converts them into a
//!   [`RunResult`] and never lets a validation outcome escape as an error.
//! - No shared state: every call is independent apart from the file reads
//!   it performs.

pub mod document;
pub mod resolve;
pub mod run;
pub mod validate;

// Re-export primary types.
pub use cval_core::RunResult;
pub use document::{read_document, DocumentLoadError};
pub use resolve::{resolve_inputs, ResolutionError, ResolvedInputs, RunParameters};
pub use run::{run, run_value, RequestError, RunRequest};
pub use validate::{
    validate_payload, validate_schema, ContractValidationError, PayloadValidationError,
    SchemaValidationError,
};
