//! Shared domain types and storage contracts for the Quill services.
//!
//! Both the identity service and the notes service depend on this crate:
//! the identity service persists [`User`] records and the notes service
//! persists [`Note`] records scoped to a user. The storage traits defined
//! here are implemented by `quill-postgres` (authoritative store) and, for
//! notes, wrapped by the cache-aside decorator in `quill-cache`.

pub mod error;
pub mod note;
pub mod user;

pub use error::{StorageError, StorageResult};
pub use note::{NewNote, Note, NoteStorage};
pub use user::{NewUser, User, UserStorage};
