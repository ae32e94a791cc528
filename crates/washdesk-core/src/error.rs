//! # Error Types
//!
//! Domain-specific error types for washdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  washdesk-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Record ids that cannot become file names       │
//! │                                                                         │
//! │  washdesk-store errors (separate crate)                                │
//! │  └── StoreError       - NotFound, I/O, malformed files                 │
//! │                                                                         │
//! │  backoffice errors (in app)                                            │
//! │  └── ApiError         - What the request dispatcher sees               │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → ApiError → Dispatcher            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Schema validation of incoming records happens upstream in the
//! dispatcher. The only check made here is the one the file layout depends
//! on: a record id must be usable as a file name.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Username/password pair matched no employee.
    #[error("Invalid credentials")]
    Unauthorized,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. an id containing a path separator).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain '/'".to_string(),
        };
        assert_eq!(err.to_string(), "id has invalid format: must not contain '/'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(CoreError::Unauthorized.to_string(), "Invalid credentials");
    }
}
