//! # Validation Issues
//!
//! An [`Issue`] is one violation found while validating a document: a
//! human-readable message plus the [`PathSegment`]s leading from the
//! document root to the offending value. An empty path means the document
//! root itself (for example, a missing required property).
//!
//! The validation engine reports locations as JSON Pointers (RFC 6901).
//! [`Issue::from_pointer`] turns a pointer into typed segments by walking the
//! validated document, so `"/items/0"` becomes `["items", 0]` when `items`
//! is an array but `["items", "0"]` when it is an object.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step in the location of a value within a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position within an array.
    Index(usize),
    /// Property name within an object.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    message: String,
    path: Vec<PathSegment>,
}

impl Issue {
    /// Create an issue at an explicit location.
    pub fn new(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    /// Create an issue located at the document root.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new())
    }

    /// Create an issue from an engine-reported JSON Pointer.
    ///
    /// `document` is the value the pointer refers into; it is used to tell
    /// array indices apart from numeric-looking object keys. Once the
    /// pointer leaves the document, numeric tokens are kept as keys.
    pub fn from_pointer(message: impl Into<String>, pointer: &str, document: &Value) -> Self {
        Self::new(message, segments_from_pointer(pointer, document))
    }

    /// Human-readable description of the violation.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Location of the violation; empty for the document root.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Returns true if the violation is at the document root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Render the path as an RFC 6901 JSON Pointer (`""` for the root).
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            match segment {
                PathSegment::Index(index) => out.push_str(&index.to_string()),
                PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
            }
        }
        out
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.pointer(), self.message)
        }
    }
}

/// Split a JSON Pointer into typed segments, resolving each token against
/// `document` as it goes.
fn segments_from_pointer(pointer: &str, document: &Value) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut node = Some(document);

    for raw in pointer.split('/').skip(1) {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let segment = match (node, token.parse::<usize>()) {
            (Some(Value::Array(_)), Ok(index)) => PathSegment::Index(index),
            _ => PathSegment::Key(token),
        };
        node = match (&segment, node) {
            (PathSegment::Index(index), Some(Value::Array(items))) => items.get(*index),
            (PathSegment::Key(key), Some(Value::Object(map))) => map.get(key),
            _ => None,
        };
        segments.push(segment);
    }

    segments
}
