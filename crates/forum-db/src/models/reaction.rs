//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for forum_reaction_types table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTypeModel {
    pub id: i32,
    pub emoji: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-type aggregate row for a post
#[derive(Debug, Clone, FromRow)]
pub struct ReactionSummaryModel {
    pub reaction_type_id: i32,
    pub emoji: String,
    pub name: String,
    pub count: i64,
    pub user_reacted: bool,
}
