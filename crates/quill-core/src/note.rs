//! Note record and storage trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::StorageResult;

/// A note owned by exactly one user.
///
/// Only the owner may read, update, or delete it. Ownership is enforced
/// at the storage boundary with a conditional row predicate, not trusted
/// from token claims alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Row identifier assigned by the store.
    pub id: i64,

    /// Short title.
    pub title: String,

    /// Body text.
    pub content: String,

    /// Owning user's id.
    pub user_id: i64,

    /// When the note was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the note was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// Storage operations for notes.
///
/// `quill-postgres` provides the authoritative implementation;
/// `quill-cache` wraps any implementation with the cache-aside layer.
/// Mutations through a cache-aware implementation must invalidate the
/// owner's cache entry before returning success.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Inserts a new note and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn create_note(&self, note: &NewNote) -> StorageResult<i64>;

    /// Lists the owner's notes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    async fn list_notes(&self, owner_id: i64) -> StorageResult<Vec<Note>>;

    /// Updates a note's title and content.
    ///
    /// The update only applies when both `note_id` and `owner_id` match
    /// the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFoundOrForbidden`] when no row
    /// matched, or another `StorageError` if the store fails.
    async fn update_note(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> StorageResult<()>;

    /// Deletes a note, subject to the same ownership predicate as
    /// [`NoteStorage::update_note`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::NotFoundOrForbidden`] when no row
    /// matched, or another `StorageError` if the store fails.
    async fn delete_note(&self, note_id: i64, owner_id: i64) -> StorageResult<()>;
}
