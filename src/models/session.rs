//! Login session model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A login session row. The token is the opaque value stored in the
/// browser's session cookie.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
