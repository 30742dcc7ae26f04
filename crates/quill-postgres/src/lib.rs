//! PostgreSQL storage backend for Quill.
//!
//! Provides persistent storage for:
//!
//! - Users (identity service)
//! - Notes (notes service)
//!
//! Each service creates its own tables on startup via [`schema`] and talks
//! to the database through the storage traits in `quill-core`, so handlers
//! never see sqlx types.

pub mod config;
pub mod error;
pub mod notes;
pub mod pool;
pub mod schema;
pub mod users;

pub use config::PostgresConfig;
pub use notes::PostgresNoteStorage;
pub use pool::{create_pool, test_connection};
pub use schema::{ensure_notes_schema, ensure_users_schema};
pub use users::PostgresUserStorage;

pub use sqlx_postgres::PgPool;
