//! Error types for storage operations.

/// Errors that can occur while talking to the authoritative store.
///
/// The cache layer never produces these: cache failures are logged and
/// degrade to store reads, they are not surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The target row does not exist or is not owned by the acting user.
    ///
    /// Ownership checks are folded into the row predicate, so "absent" and
    /// "exists but owned by someone else" are deliberately indistinguishable
    /// here — distinguishing them would leak existence to non-owners.
    #[error("Not found or not owned by caller")]
    NotFoundOrForbidden,

    /// A uniqueness constraint was violated (e.g. duplicate email).
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting constraint.
        message: String,
    },

    /// The store is unreachable (pool exhausted, connection refused).
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Description of the connectivity failure.
        message: String,
    },

    /// Any other database failure.
    #[error("Database error: {message}")]
    Database {
        /// Description of the underlying failure.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a new `Unavailable` error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a new `Database` error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Returns `true` if the error maps to a 4xx outcome for the caller.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFoundOrForbidden | Self::Conflict { .. })
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::conflict("users.email already exists");
        assert_eq!(err.to_string(), "Conflict: users.email already exists");

        let err = StorageError::NotFoundOrForbidden;
        assert_eq!(err.to_string(), "Not found or not owned by caller");
    }

    #[test]
    fn test_client_error_predicate() {
        assert!(StorageError::NotFoundOrForbidden.is_client_error());
        assert!(StorageError::conflict("dup").is_client_error());
        assert!(!StorageError::database("boom").is_client_error());
        assert!(!StorageError::unavailable("down").is_client_error());
    }
}
