//! Custom error types for addrbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::fields::ValidationError;

/// The main error type for addrbook operations
#[derive(Error, Debug)]
pub enum AddrBookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for contact fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The saved address book exists but cannot be read back
    #[error("Address book at {} is unreadable: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl AddrBookError {
    /// Create a "not found" error for records
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for a phone number on a record
    pub fn phone_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Phone",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for an email address on a record
    pub fn email_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Email",
            identifier: identifier.into(),
        }
    }

    /// Create a "corrupt state" error for a saved book
    pub fn corrupt_state(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptState {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the saved book could not be read back
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::CorruptState { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AddrBookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AddrBookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ValidationError> for AddrBookError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for addrbook operations
pub type AddrBookResult<T> = Result<T, AddrBookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddrBookError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = AddrBookError::record_not_found("42");
        assert_eq!(err.to_string(), "Record not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_phone_not_found_error() {
        let err = AddrBookError::phone_not_found("123456789");
        assert_eq!(err.to_string(), "Phone not found: 123456789");
    }

    #[test]
    fn test_corrupt_state_error() {
        let err = AddrBookError::corrupt_state("/tmp/book.json", "expected value");
        assert!(err.is_corrupt_state());
        assert_eq!(
            err.to_string(),
            "Address book at /tmp/book.json is unreadable: expected value"
        );
    }

    #[test]
    fn test_from_validation_error() {
        let err: AddrBookError = ValidationError::InvalidPhone("12".into()).into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AddrBookError = io_err.into();
        assert!(matches!(err, AddrBookError::Io(_)));
    }
}
