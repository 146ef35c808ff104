#![deny(missing_docs)]

//! # cval-core — Foundational Types for Contract Validation
//!
//! This crate defines the types every other crate in the workspace speaks:
//! the [`Issue`] record describing one violation, the [`PathSegment`] steps
//! that locate it, and the uniform [`RunResult`] produced by a validation
//! run. It has no internal crate dependencies — only `serde` and
//! `serde_json` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Issues are values.** An [`Issue`] has no identity beyond its message
//!    and path. It is created once per violation and never mutated.
//!
//! 2. **[`RunResult`] cannot be built in an inconsistent state.** The only
//!    constructors are [`RunResult::success`] and [`RunResult::failure`];
//!    a success never carries issues or an error type, and a failure always
//!    carries at least one issue and exactly one [`ErrorType`]. The same
//!    rules are enforced when a result is deserialized.
//!
//! 3. **Stable wire shape.** `status` and `error_type` serialize as the
//!    lowercase strings `"success"`/`"failure"` and `"schema"`/`"payload"`;
//!    issue paths serialize as arrays of object keys and array indices.

pub mod issue;
pub mod result;

// Re-export primary types at crate root for ergonomic imports.
pub use issue::{Issue, PathSegment};
pub use result::{ErrorType, RunResult, RunStatus, ValidationResult};
