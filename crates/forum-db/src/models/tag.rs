//! Tag database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_tags table
#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for user_tag_assignments table
#[derive(Debug, Clone, FromRow)]
pub struct TagAssignmentModel {
    pub user_id: i64,
    pub tag_id: i32,
    pub assigned_by: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub state: String,
}

/// An assignment joined with its tag
#[derive(Debug, Clone, FromRow)]
pub struct UserTagModel {
    pub user_id: i64,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    #[sqlx(flatten)]
    pub tag: TagModel,
}
