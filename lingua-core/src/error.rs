//! Unified error handling for the Lingua platform
//!
//! Three families of failures exist in the system: validation errors caught
//! before any store call, store/service errors that are recoverable by
//! retrying the triggering action, and authentication failures. Authorization
//! outcomes are not errors — they are explicit gate decisions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type LinguaResult<T> = Result<T, LinguaError>;

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main error type for the Lingua system
#[derive(Error, Debug)]
pub enum LinguaError {
    /// Request payload failed validation; no store call was made.
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Mutation refused because dependent rows exist.
    #[error("{message}")]
    Conflict { message: String },

    /// The addressed entity does not exist.
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Underlying store failure.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication failure (missing or bad credentials).
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Bad configuration detected at startup.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LinguaError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    pub fn storage_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether retrying the same action can succeed without other changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_display() {
        let err = FieldError::new("name", "is required");
        assert_eq!(err.to_string(), "name: is required");
    }

    #[test]
    fn storage_errors_are_retryable() {
        assert!(LinguaError::storage("connection reset").is_retryable());
        assert!(!LinguaError::conflict("language is in use").is_retryable());
        assert!(!LinguaError::field("level", "unknown level").is_retryable());
    }
}
