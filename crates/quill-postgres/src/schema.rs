//! Startup schema management.
//!
//! Both services own their tables: the identity service creates `users`,
//! the notes service creates `notes`. Statements are idempotent so a
//! restart against an existing database is a no-op.

use sqlx_postgres::PgPool;
use tracing::{info, instrument};

use quill_core::StorageResult;

use crate::error::map_sqlx_error;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_NOTES: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_NOTES_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes (user_id)";

/// Creates the `users` table if missing.
#[instrument(skip(pool))]
pub async fn ensure_users_schema(pool: &PgPool) -> StorageResult<()> {
    sqlx_core::query::query(CREATE_USERS)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

    info!("users schema ready");
    Ok(())
}

/// Creates the `notes` table and its owner index if missing.
#[instrument(skip(pool))]
pub async fn ensure_notes_schema(pool: &PgPool) -> StorageResult<()> {
    sqlx_core::query::query(CREATE_NOTES)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

    sqlx_core::query::query(CREATE_NOTES_OWNER_INDEX)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

    info!("notes schema ready");
    Ok(())
}
