//! Cross-cutting error types for the feedback board.
//!
//! This module defines the expected, caller-recoverable outcomes of the
//! workflow. Storage failures are defined in `fb-db` as `DatabaseError`, and
//! the service-level union of both lives there as `FeedbackError`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::FeedbackStatus;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Errors raised by the workflow and its input validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced feedback item does not exist.
    #[error("Feedback not found: {id}")]
    NotFound { id: String },

    /// The requested status is not reachable from the current status.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: FeedbackStatus,
        to: FeedbackStatus,
    },

    /// Input failed field validation.
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// Input was malformed as a whole (bad id format, unparseable body).
    #[error("{0}")]
    BadRequest(String),
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A string did not match any variant of a closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} must be one of: {} (got '{value}')", .expected.join(", "))]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl ParseEnumError {
    #[must_use]
    pub fn new(kind: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
