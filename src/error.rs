//! Custom error types for usercat
//!
//! This module defines the error hierarchy for the catalog using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors raised at the input boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An entity with the same identity is already stored
    #[error("{entity_type} already exists: {identifier}")]
    DuplicateIdentity {
        entity_type: &'static str,
        identifier: String,
    },

    /// More than one tracked handle is outstanding for the identity being updated
    #[error("{entity_type} {identifier} is tracked by {handles} handles; only one edit may be in flight")]
    ConflictingTracker {
        entity_type: &'static str,
        identifier: String,
        handles: usize,
    },

    /// Declared operation that is not supported yet
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for audit records
    pub fn audit_record_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "AuditRecord",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a tracking conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingTracker { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CatalogError::user_not_found(42);
        assert_eq!(err.to_string(), "User not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_conflicting_tracker_error() {
        let err = CatalogError::ConflictingTracker {
            entity_type: "User",
            identifier: "7".into(),
            handles: 2,
        };
        assert_eq!(
            err.to_string(),
            "User 7 is tracked by 2 handles; only one edit may be in flight"
        );
        assert!(err.is_conflict());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let catalog_err: CatalogError = io_err.into();
        assert!(matches!(catalog_err, CatalogError::Io(_)));
    }
}
