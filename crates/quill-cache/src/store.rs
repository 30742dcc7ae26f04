//! Cache-aside decorator over a [`NoteStorage`].

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::{NewNote, Note, NoteStorage, StorageResult};

use crate::notes::NotesCache;

/// Wraps a note store with per-owner list caching.
///
/// Reads go through the cache; every write goes to the inner store first
/// and, once it succeeds, drops the owner's cached list. A failed write
/// leaves the cache untouched since nothing changed underneath it.
pub struct CachedNoteStorage {
    inner: Arc<dyn NoteStorage>,
    cache: NotesCache,
}

impl CachedNoteStorage {
    /// Wrap a note store with the given cache.
    pub fn new(inner: Arc<dyn NoteStorage>, cache: NotesCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl NoteStorage for CachedNoteStorage {
    async fn create_note(&self, note: &NewNote) -> StorageResult<i64> {
        let id = self.inner.create_note(note).await?;
        self.cache.invalidate(note.user_id).await;
        Ok(id)
    }

    async fn list_notes(&self, owner_id: i64) -> StorageResult<Vec<Note>> {
        if let Some(notes) = self.cache.get(owner_id).await {
            return Ok(notes);
        }
        let notes = self.inner.list_notes(owner_id).await?;
        self.cache.set(owner_id, &notes).await;
        Ok(notes)
    }

    async fn update_note(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> StorageResult<()> {
        self.inner
            .update_note(note_id, owner_id, title, content)
            .await?;
        self.cache.invalidate(owner_id).await;
        Ok(())
    }

    async fn delete_note(&self, note_id: i64, owner_id: i64) -> StorageResult<()> {
        self.inner.delete_note(note_id, owner_id).await?;
        self.cache.invalidate(owner_id).await;
        Ok(())
    }
}
