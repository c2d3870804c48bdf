//! Error type definitions.
//!
//! This module defines the error types used throughout the crate.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors surfaced by the audit core and its data-access capability.
///
/// Lifecycle components (`ReportLifecycle`, `CrawlSession`) never propagate
/// these past their boundary; they convert every failure into their `Failed`
/// state with the rendered message. Pure components (the classifier, the
/// collection view) never produce them at all.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Network failure or a non-success response from the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// Input rejected before it was sent anywhere (e.g. a malformed domain).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced project or link is absent from the loaded collection.
    #[error("{0} not found")]
    NotFound(String),

    /// A serialized field on a fetched record or report payload did not have
    /// the expected shape.
    #[error("failed to decode field '{field}': {message}")]
    Decode {
        /// Name of the field that failed to decode.
        field: String,
        /// Human-readable description of the mismatch.
        message: String,
    },
}

impl AuditError {
    /// Builds a [`AuditError::Decode`] for a named field.
    pub fn decode(field: &str, err: impl std::fmt::Display) -> Self {
        AuditError::Decode {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ReqwestError> for AuditError {
    fn from(e: ReqwestError) -> Self {
        AuditError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_error_display() {
        let err = AuditError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = AuditError::NotFound("project 42".to_string());
        assert_eq!(err.to_string(), "project 42 not found");

        let err = AuditError::decode("h1_tags", "expected a JSON array");
        assert_eq!(
            err.to_string(),
            "failed to decode field 'h1_tags': expected a JSON array"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = AuditError::Validation("domain must not include a scheme".to_string());
        assert!(err.to_string().contains("domain must not include a scheme"));
    }
}
