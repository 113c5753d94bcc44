//! Topic database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for forum_topics joined with its aggregated tag names
#[derive(Debug, Clone, FromRow)]
pub struct TopicModel {
    pub id: Uuid,
    pub category_id: Uuid,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i32,
    pub replies: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
