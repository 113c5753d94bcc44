//! Role database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_roles table
#[derive(Debug, Clone, FromRow)]
pub struct RoleModel {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub permissions: i64,
    pub hierarchy_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
