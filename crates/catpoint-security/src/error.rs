//! # Error Types
//!
//! The transition rules are total, so the only failures a security
//! operation can report are collaborator failures, which propagate
//! unchanged inside [`SecurityError`].

use catpoint_image::ClassifierError;
use thiserror::Error;

/// A repository backend failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The storage backend rejected or failed an operation.
    #[error("storage error during {operation}: {message}")]
    Storage {
        /// What the repository was doing.
        operation: String,
        /// Backend-provided detail.
        message: String,
    },
}

impl RepositoryError {
    /// Build a storage error for `operation`.
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Error returned by [`SecurityService`](crate::SecurityService) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SecurityError {
    /// Repository read or write failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Image classifier failed.
    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Error loading or validating [`SecurityConfig`](crate::SecurityConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML did not match the config schema.
    #[error("invalid config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Confidence threshold outside `0.0..=100.0`.
    #[error("confidence_threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = RepositoryError::storage("set alarm status", "disk full");
        assert_eq!(
            err.to_string(),
            "storage error during set alarm status: disk full"
        );
    }

    #[test]
    fn test_security_error_wraps_collaborators() {
        let err: SecurityError = RepositoryError::storage("load sensors", "gone").into();
        assert!(matches!(err, SecurityError::Repository(_)));
        let err: SecurityError = ClassifierError::InvalidThreshold(120.0).into();
        assert!(err.to_string().starts_with("classifier error:"));
    }
}
