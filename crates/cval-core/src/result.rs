//! # Run Results
//!
//! [`RunResult`] is the uniform outcome of one validation run, tagged
//! success or failure. On failure it names the stage that failed with an
//! [`ErrorType`] and lists the issues that stage produced.
//!
//! [`ValidationResult`] is the narrower outcome of checking a payload
//! against an already accepted schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Message used when a failure is recorded without any issue attached.
const UNSPECIFIED_FAILURE: &str = "validation failed";

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every stage passed.
    Success,
    /// A stage failed; see [`RunResult::error_type`].
    Failure,
}

impl RunStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stage, or input slot, a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// The schema could not be loaded or is not a valid JSON Schema.
    Schema,
    /// The payload could not be loaded or violates the schema.
    Payload,
}

impl ErrorType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::Payload => "payload",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating a payload against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no violations were found.
    pub success: bool,
    /// Violations in the engine's enumeration order.
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    /// A passing result with no issues.
    pub fn passed() -> Self {
        Self {
            success: true,
            issues: Vec::new(),
        }
    }
}

/// Uniform result of a validation run.
///
/// Success results have no issues and no error type; failure results have
/// at least one issue and exactly one error type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRunResult")]
pub struct RunResult {
    status: RunStatus,
    issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_type: Option<ErrorType>,
}

impl RunResult {
    /// A successful run.
    pub fn success() -> Self {
        Self {
            status: RunStatus::Success,
            issues: Vec::new(),
            error_type: None,
        }
    }

    /// A failed run attributed to `error_type`.
    ///
    /// An empty `issues` vector is replaced with a single root issue so that
    /// a failure is never reported without an explanation.
    pub fn failure(error_type: ErrorType, mut issues: Vec<Issue>) -> Self {
        if issues.is_empty() {
            issues.push(Issue::at_root(UNSPECIFIED_FAILURE));
        }
        Self {
            status: RunStatus::Failure,
            issues,
            error_type: Some(error_type),
        }
    }

    /// Overall status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns true for a successful run.
    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Issues collected by the failing stage; empty on success.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The failing stage, if any.
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }

    /// Consumes self and returns the issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// Unchecked wire form, validated into a [`RunResult`] on deserialization.
#[derive(Deserialize)]
struct RawRunResult {
    status: RunStatus,
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    error_type: Option<ErrorType>,
}

impl TryFrom<RawRunResult> for RunResult {
    type Error = String;

    fn try_from(raw: RawRunResult) -> Result<Self, Self::Error> {
        match (raw.status, raw.error_type) {
            (RunStatus::Success, None) if raw.issues.is_empty() => Ok(Self::success()),
            (RunStatus::Success, _) => {
                Err("a successful result cannot carry issues or an error_type".to_string())
            }
            (RunStatus::Failure, Some(error_type)) if !raw.issues.is_empty() => Ok(Self {
                status: RunStatus::Failure,
                issues: raw.issues,
                error_type: Some(error_type),
            }),
            (RunStatus::Failure, _) => {
                Err("a failed result requires an error_type and at least one issue".to_string())
            }
        }
    }
}
