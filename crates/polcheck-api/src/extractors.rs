//! # Query Extraction
//!
//! Maps query-string rejections onto [`AppError`] so malformed parameters get
//! the structured error body instead of axum's plain-text rejection.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;

use crate::error::AppError;

/// Extract query parameters, mapping deserialization errors to
/// [`AppError::Validation`].
///
/// Handlers take `Result<Query<T>, QueryRejection>` and call this first.
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::Validation(err.body_text()))
}
