//! # Error Types: Validation Failure Taxonomy
//!
//! Every rejected search response maps to exactly one [`ValidationError`].
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Structural errors: a required key is absent.
//! - Type errors: the key is present but holds the wrong JSON type.
//! - Constraint errors: present and typed, but a semantic rule fails
//!   (blank string, negative stat, unknown gender, malformed URL).
//!
//! Each variant carries the [`FieldPath`] of the offending value. Nothing is
//! coerced into a default to make a document pass.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::path::FieldPath;

/// JSON type of a value, as reported in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Returns the kind of a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Required key missing.
    Structural,
    /// Wrong JSON type.
    Type,
    /// Semantic rule violated.
    Constraint,
}

/// A search response (or one of its records) failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent under both its internal name and its
    /// wire alias.
    #[error("{path}: field required")]
    MissingField {
        /// Location of the missing field.
        path: FieldPath,
    },

    /// The field holds a JSON value of the wrong type.
    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        /// Location of the offending value.
        path: FieldPath,
        /// Description of the accepted type(s).
        expected: &'static str,
        /// The JSON type actually present.
        found: JsonKind,
    },

    /// The field is present and typed correctly but violates a rule.
    #[error("{path}: {reason}")]
    Constraint {
        /// Location of the offending value.
        path: FieldPath,
        /// Human-readable reason the rule rejected the value.
        reason: String,
    },
}

impl ValidationError {
    /// Location of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::MissingField { path }
            | Self::WrongType { path, .. }
            | Self::Constraint { path, .. } => path,
        }
    }

    /// Which taxonomy class this failure belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingField { .. } => ErrorClass::Structural,
            Self::WrongType { .. } => ErrorClass::Type,
            Self::Constraint { .. } => ErrorClass::Constraint,
        }
    }

    /// Reason text without the path prefix.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingField { .. } => "field required".to_string(),
            Self::WrongType {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
            Self::Constraint { reason, .. } => reason.clone(),
        }
    }
}
