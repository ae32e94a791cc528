//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and entity name         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (backoffice) ← NotFound / BadInput / Internal                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use washdesk_core::ValidationError;

/// File store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    ///
    /// ## When This Occurs
    /// - `get_by_id` / `delete` on an absent id
    /// - Deleting a ledger entry that is not in the owner's ledger
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading, writing, renaming or removing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file that must be readable (ledger, singleton) holds invalid JSON.
    #[error("Malformed JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The data root could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record id cannot be used as a file name.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, source: serde_json::Error) -> Self {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for the NotFound variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
