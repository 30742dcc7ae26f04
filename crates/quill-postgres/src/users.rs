//! User storage.

use async_trait::async_trait;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use time::OffsetDateTime;

use quill_core::{NewUser, StorageError, StorageResult, User, UserStorage};

use crate::error::{is_unique_violation, map_sqlx_error};

type UserTuple = (i64, String, String, String, OffsetDateTime);

fn user_from_tuple(row: UserTuple) -> User {
    User {
        id: row.0,
        username: row.1,
        email: row.2,
        password_hash: row.3,
        created_at: row.4,
    }
}

/// PostgreSQL-backed [`UserStorage`].
#[derive(Clone)]
pub struct PostgresUserStorage {
    pool: PgPool,
}

impl PostgresUserStorage {
    /// Create a user storage over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStorage for PostgresUserStorage {
    async fn create_user(&self, user: &NewUser) -> StorageResult<i64> {
        let row: (i64,) = query_as(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return StorageError::conflict("email already registered");
            }
            map_sqlx_error(e)
        })?;

        Ok(row.0)
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let row: Option<UserTuple> = query_as(
            r#"
            SELECT id, username, email, password, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(user_from_tuple))
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<User>> {
        let row: Option<UserTuple> = query_as(
            r#"
            SELECT id, username, email, password, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(user_from_tuple))
    }
}
