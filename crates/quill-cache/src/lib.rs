//! Cache-aside layer for the Quill notes store.
//!
//! [`CacheBackend`] holds the raw byte cache (in-process or Redis),
//! [`NotesCache`] puts note-list semantics on top of it, and
//! [`CachedNoteStorage`] decorates any [`quill_core::NoteStorage`] so
//! handlers never talk to the cache directly.

pub mod backend;
pub mod notes;
pub mod store;

pub use backend::{CacheBackend, CachedEntry};
pub use notes::{DEFAULT_NOTES_TTL, NotesCache};
pub use store::CachedNoteStorage;
