//! Validation error types shared by the form layer

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single violated form rule
///
/// Forms report every violation at once, so these are collected into a
/// `Vec<FieldError>` in form order rather than short-circuiting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Backend field name (snake_case)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Required field left empty
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{} is required", field.replace('_', " "));
        Self { field, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Session context errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("user_id not found")]
    MissingUserId,

    #[error("invalid {name}: {value}")]
    InvalidParam { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message() {
        let err = FieldError::required("id_proof_number");
        assert_eq!(err.field, "id_proof_number");
        assert_eq!(err.message, "id proof number is required");
        assert_eq!(err.to_string(), "id_proof_number: id proof number is required");
    }
}
