//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub minecraft_username: Option<String>,
    pub avatar: Option<String>,
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}
