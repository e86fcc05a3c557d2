// ⚠️ Error taxonomy
// Two ways a request can fail: the receipt is invalid, or the id is unknown.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// RECEIPT ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The submitted receipt failed shape, format, or pattern checks.
    /// Always carries at least one field error.
    #[error("invalid receipt: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// No receipt was ever stored under this id.
    #[error("no receipt found for id {0}")]
    NotFound(String),
}

impl ReceiptError {
    /// Shorthand for a single-field validation failure.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReceiptError::Validation(vec![ValidationError::new(field, message)])
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
