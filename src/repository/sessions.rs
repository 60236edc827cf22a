//! Sessions repository for database operations

use chrono::{Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::session::Session};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: Pool<Postgres>,
}

impl SessionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Store a new session token for a user
    pub async fn create(&self, token: &str, user_id: i32, ttl_hours: i64) -> AppResult<()> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(ttl_hours);

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a session by token, ignoring expired rows
    pub async fn find_valid(&self, token: &str) -> AppResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Remove a session (logout)
    pub async fn delete(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Drop expired sessions. Called opportunistically at startup.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
