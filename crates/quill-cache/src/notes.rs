//! Per-owner note list caching.
//!
//! Caches the full note list of one owner under a single key, serialized
//! as MessagePack.
//!
//! ## Cache Key Format
//!
//! `user:{owner_id}:notes` — e.g. `user:42:notes`
//!
//! ## Invalidation
//!
//! Invalidated on every note create, update, and delete for that owner.

use std::time::Duration;

use quill_core::Note;

use crate::backend::CacheBackend;

/// Default lifetime of a cached note list.
pub const DEFAULT_NOTES_TTL: Duration = Duration::from_secs(120);

/// Cached note serialized as MessagePack for compact storage.
#[derive(serde::Serialize, serde::Deserialize)]
struct CachedNote {
    id: i64,
    title: String,
    content: String,
    user_id: i64,
    created_at_ts: i64,
    updated_at_ts: i64,
}

impl CachedNote {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            user_id: note.user_id,
            created_at_ts: note.created_at.unix_timestamp(),
            updated_at_ts: note.updated_at.unix_timestamp(),
        }
    }

    fn into_note(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            user_id: self.user_id,
            created_at: time::OffsetDateTime::from_unix_timestamp(self.created_at_ts)
                .unwrap_or(time::OffsetDateTime::UNIX_EPOCH),
            updated_at: time::OffsetDateTime::from_unix_timestamp(self.updated_at_ts)
                .unwrap_or(time::OffsetDateTime::UNIX_EPOCH),
        }
    }
}

/// Read cache for per-owner note lists.
#[derive(Clone)]
pub struct NotesCache {
    backend: CacheBackend,
    ttl: Duration,
}

impl NotesCache {
    /// Create a new notes cache with the given backend and TTL.
    pub fn new(backend: CacheBackend, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Generate the cache key for an owner's note list.
    #[inline]
    fn cache_key(owner_id: i64) -> String {
        format!("user:{owner_id}:notes")
    }

    /// Get the cached note list for an owner.
    ///
    /// An empty cached list counts as a miss, so an owner whose notes
    /// failed to appear in the cache is always re-read from the store.
    pub async fn get(&self, owner_id: i64) -> Option<Vec<Note>> {
        let key = Self::cache_key(owner_id);
        let data = self.backend.get(&key).await?;
        match rmp_serde::from_slice::<Vec<CachedNote>>(&data) {
            Ok(cached) if !cached.is_empty() => {
                Some(cached.into_iter().map(CachedNote::into_note).collect())
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to deserialize cached notes");
                self.backend.invalidate(&key).await;
                None
            }
        }
    }

    /// Cache an owner's note list after a successful read.
    ///
    /// Empty lists are never written; caching "no notes yet" would hide
    /// the owner's first notes for a full TTL window on a stale read.
    pub async fn set(&self, owner_id: i64, notes: &[Note]) {
        if notes.is_empty() {
            return;
        }
        let key = Self::cache_key(owner_id);
        let cached: Vec<CachedNote> = notes.iter().map(CachedNote::from_note).collect();
        match rmp_serde::to_vec(&cached) {
            Ok(data) => {
                self.backend.set(&key, data, self.ttl).await;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize notes for cache");
            }
        }
    }

    /// Invalidate an owner's cached note list (on create/update/delete).
    pub async fn invalidate(&self, owner_id: i64) {
        let key = Self::cache_key(owner_id);
        self.backend.invalidate(&key).await;
    }
}
