//! # Error Types
//!
//! Validation errors for domain values, built with `thiserror`.

use thiserror::Error;

/// Validation errors for domain values.
///
/// Each variant carries the rejected input so operators can see what was
/// supplied without reproducing the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text does not name one of the closed set of validation statuses.
    #[error("invalid validation status: \"{0}\" (expected VALID, NEEDS_REVIEW or CONFLICT_SUSPECTED)")]
    InvalidStatus(String),
}
