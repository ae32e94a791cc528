//! # Record Id Validation
//!
//! Every record is stored as `<id>.json` under its collection directory, and
//! ledgers as `<owner id>.json`. An id therefore has to be a plain file
//! name: no separators, no parent references, nothing hidden.

use crate::error::ValidationError;

/// Checks that `id` can be used as a file stem.
///
/// ## Example
/// ```rust
/// use washdesk_core::validation::validate_record_id;
///
/// assert!(validate_record_id("id", "we_1700000000000_a1b2c3d").is_ok());
/// assert!(validate_record_id("id", "../inventory").is_err());
/// ```
pub fn validate_record_id(field: &str, id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let reason = if id.contains('/') || id.contains('\\') {
        Some("must not contain path separators")
    } else if id.contains("..") {
        Some("must not contain '..'")
    } else if id.contains('\0') {
        Some("must not contain NUL")
    } else if id.starts_with('.') {
        Some("must not start with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
