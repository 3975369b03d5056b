//! Client error types

use shared::FieldError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Form validation failed; every violated rule is listed
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Upload rejected by the server
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Submission rejected by the server
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Operation invoked in a state that does not allow it
    #[error("Not ready: {0}")]
    NotReady(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ClientError {
    /// Single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Violated form rules, if this is a validation error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Transport-level failure (network, status, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. } | Self::Timeout(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_all() {
        let err = ClientError::Validation(vec![
            FieldError::new("name", "name is required"),
            FieldError::new("mobile", "Please enter a valid 10-digit mobile number"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: name is required; Please enter a valid 10-digit mobile number"
        );
        assert_eq!(err.field_errors().len(), 2);
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Timeout(30).is_transport());
        assert!(
            ClientError::Status {
                status: 502,
                body: String::new()
            }
            .is_transport()
        );
        assert!(ClientError::InvalidResponse("x".into()).field_errors().is_empty());
    }
}
