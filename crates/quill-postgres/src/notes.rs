//! Note storage.
//!
//! Every statement that touches a single note filters on both the note id
//! and the owner id, so an affected count of zero covers "does not exist"
//! and "belongs to someone else" with one answer.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use time::OffsetDateTime;

use quill_core::{NewNote, Note, NoteStorage, StorageError, StorageResult};

use crate::error::map_sqlx_error;

type NoteTuple = (i64, String, String, i64, OffsetDateTime, OffsetDateTime);

fn note_from_tuple(row: NoteTuple) -> Note {
    Note {
        id: row.0,
        title: row.1,
        content: row.2,
        user_id: row.3,
        created_at: row.4,
        updated_at: row.5,
    }
}

/// PostgreSQL-backed [`NoteStorage`].
#[derive(Clone)]
pub struct PostgresNoteStorage {
    pool: PgPool,
}

impl PostgresNoteStorage {
    /// Create a note storage over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStorage for PostgresNoteStorage {
    async fn create_note(&self, note: &NewNote) -> StorageResult<i64> {
        let row: (i64,) = query_as(
            r#"
            INSERT INTO notes (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.0)
    }

    async fn list_notes(&self, owner_id: i64) -> StorageResult<Vec<Note>> {
        let rows: Vec<NoteTuple> = query_as(
            r#"
            SELECT id, title, content, user_id, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(note_from_tuple).collect())
    }

    async fn update_note(
        &self,
        note_id: i64,
        owner_id: i64,
        title: &str,
        content: &str,
    ) -> StorageResult<()> {
        let result = query(
            r#"
            UPDATE notes
            SET title = $3,
                content = $4,
                updated_at = NOW()
            WHERE id = $1
              AND user_id = $2
            "#,
        )
        .bind(note_id)
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFoundOrForbidden);
        }

        Ok(())
    }

    async fn delete_note(&self, note_id: i64, owner_id: i64) -> StorageResult<()> {
        let result = query(
            r#"
            DELETE FROM notes
            WHERE id = $1
              AND user_id = $2
            "#,
        )
        .bind(note_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFoundOrForbidden);
        }

        Ok(())
    }
}
