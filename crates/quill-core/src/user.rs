//! User record and storage trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::StorageResult;

/// A registered user.
///
/// The `password_hash` field holds the PHC-formatted Argon2 verifier,
/// never the plaintext password. Filter it out before exposing a user
/// over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Row identifier assigned by the store.
    pub id: i64,

    /// Display/login name. Not unique; login is by email.
    pub username: String,

    /// Email address, unique across the store.
    pub email: String,

    /// PHC-formatted password verifier.
    pub password_hash: String,

    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for creating a user. The verifier must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Storage operations for users.
///
/// Users are created once at registration and never mutated or deleted.
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Inserts a new user and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Conflict`] if the email is already
    /// registered, or another `StorageError` if the store fails.
    async fn create_user(&self, user: &NewUser) -> StorageResult<i64>;

    /// Finds a user by email. Returns `None` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Finds a user by id. Returns `None` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<User>>;
}
