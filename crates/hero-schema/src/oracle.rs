//! # Error Oracle
//!
//! Classifies a failure body from the search endpoint against the three
//! error shapes the API is known to produce. Used only on expected-failure
//! paths; an error body is never validated as a hero.
//!
//! A body matches a shape only when it is an object with exactly the keys
//! `response` and `error`, `response` is `"error"`, and `error` is the
//! shape's exact message. Anything else, including extra keys or a change
//! in casing or wording, is [`ErrorShape::Unrecognized`]. Loosening the
//! match would hide a change in the API contract.

use serde::Serialize;
use serde_json::{json, Value};

/// Known failure bodies of the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorShape {
    /// `{"response": "error", "error": "character with given name not found"}`
    NotFound,
    /// `{"response": "error", "error": "bad name search request"}`
    BadNameRequest,
    /// `{"response": "error", "error": "access denied"}`
    AccessDenied,
    /// Anything that is not exactly one of the shapes above.
    Unrecognized,
}

const KNOWN: [ErrorShape; 3] = [
    ErrorShape::NotFound,
    ErrorShape::BadNameRequest,
    ErrorShape::AccessDenied,
];

impl ErrorShape {
    /// The exact `error` text of a recognized shape.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some("character with given name not found"),
            Self::BadNameRequest => Some("bad name search request"),
            Self::AccessDenied => Some("access denied"),
            Self::Unrecognized => None,
        }
    }

    /// The full JSON body of a recognized shape.
    pub fn body(&self) -> Option<Value> {
        self.message()
            .map(|msg| json!({ "response": "error", "error": msg }))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadNameRequest => "bad_name_request",
            Self::AccessDenied => "access_denied",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a decoded response body. Never fails.
pub fn classify_error(body: &Value) -> ErrorShape {
    let Some(map) = body.as_object() else {
        return ErrorShape::Unrecognized;
    };
    if map.len() != 2 || map.get("response").and_then(Value::as_str) != Some("error") {
        return ErrorShape::Unrecognized;
    }
    let Some(message) = map.get("error").and_then(Value::as_str) else {
        return ErrorShape::Unrecognized;
    };
    KNOWN
        .into_iter()
        .find(|shape| shape.message() == Some(message))
        .unwrap_or(ErrorShape::Unrecognized)
}

/// True for the two shapes a bad or unknown name produces.
pub fn is_not_found_error(body: &Value) -> bool {
    matches!(
        classify_error(body),
        ErrorShape::NotFound | ErrorShape::BadNameRequest
    )
}

/// True when the body reports a rejected access token.
pub fn is_access_denied(body: &Value) -> bool {
    classify_error(body) == ErrorShape::AccessDenied
}
