//! Mapping from sqlx errors to the storage error taxonomy.

use quill_core::StorageError;
use sqlx_core::error::Error as SqlxError;

/// Checks if a sqlx error is a unique constraint violation.
pub fn is_unique_violation(err: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = err {
        db_err.is_unique_violation()
    } else {
        false
    }
}

/// Converts a sqlx error into a [`StorageError`].
///
/// Connectivity failures become `Unavailable` so handlers can answer 503;
/// everything else is an unexpected database fault. Unique violations are
/// classified at the call site, where the conflicting field is known.
pub fn map_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
            StorageError::unavailable(err.to_string())
        }
        other => StorageError::database(other.to_string()),
    }
}
