//! User entity - read model of an account owned by the auth service

use chrono::{DateTime, Utc};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub minecraft_username: Option<String>,
    pub avatar: Option<String>,
    /// `None` resolves to the default role
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in the forum, preferring the in-game name
    pub fn display_name(&self) -> &str {
        self.minecraft_username
            .as_deref()
            .unwrap_or(&self.username)
    }
}

/// Input for registering a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub minecraft_username: Option<String>,
    pub avatar: Option<String>,
    pub role_id: Option<i32>,
}
