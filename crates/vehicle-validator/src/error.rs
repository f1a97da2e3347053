//! Validation Error Types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Category of a violated constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent or null
    Required,
    /// JSON type does not match the declared field type
    InvalidType,
    /// String shorter than the minimum length
    TooShort,
    /// String longer than the maximum length
    TooLong,
    /// String does not match the expected format
    Pattern,
    /// Number outside the allowed range
    OutOfRange,
    /// Value not part of the allowed enumeration
    NotAllowed,
    /// Rule spanning several fields of the same record
    CrossField,
    /// Number of records outside the allowed bounds
    Cardinality,
}

/// A single violated constraint, tagged with the path of the offending field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{path}: {message}")]
pub struct FieldError {
    /// Dotted field path (`placa`, `2.numeroMotor`); empty for set-level errors
    pub path: String,
    /// Human-readable message shown to the end user
    pub message: String,
    pub kind: ViolationKind,
    /// Offending value, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn new(
        path: impl Into<String>,
        kind: ViolationKind,
        message: impl Into<String>,
        value: Option<&Value>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
            value: value.cloned(),
        }
    }
}

/// Non-empty list of violations produced by one validation call
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed with {} error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors attached to exactly `path`
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.path == path)
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
