//! # API Error Type
//!
//! Unified error type for back-office commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Washdesk                               │
//! │                                                                         │
//! │  Request dispatcher          Rust Backend                               │
//! │  ──────────────────          ────────────                               │
//! │                                                                         │
//! │  update_wash_event(id, event)                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Absent id? ──── StoreError::NotFound ─────────┐                 │  │
//! │  │         │                                      │                 │  │
//! │  │         ▼                                      ▼                 │  │
//! │  │  Unsafe id? ──── StoreError::Validation ──── ApiError ──────────►│  │
//! │  │         │                                      ▲                 │  │
//! │  │         ▼                                      │                 │  │
//! │  │  Disk trouble? ─ StoreError::Io/Malformed ─────┘  (opaque)       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Wash event not found: we_1" }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged in full and reported with a generic
//! message; the dispatcher never sees file paths.

use serde::Serialize;
use washdesk_core::CoreError;
use washdesk_store::StoreError;

/// Error returned from every command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Employee not found: emp_1"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record absent (404)
    NotFound,

    /// Input the core cannot act on (400)
    BadInput,

    /// Credentials did not match (401)
    Unauthorized,

    /// Storage or other internal failure (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn bad_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadInput, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
///
/// ## Error Mapping
/// ```text
/// StoreError::NotFound     → NOT_FOUND
/// StoreError::Validation   → BAD_INPUT
/// everything else          → INTERNAL (logged, generic message)
/// ```
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Validation(e) => ApiError::bad_input(e.to_string()),
            other => {
                tracing::error!(error = %other, "Storage operation failed");
                ApiError::internal("Storage operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unauthorized => ApiError::new(ErrorCode::Unauthorized, err.to_string()),
            CoreError::Validation(e) => ApiError::bad_input(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
