//! Category entity - top-level grouping of topics

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Forum category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub topics_count: i32,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub const DEFAULT_COLOR: &'static str = "#3B82F6";
    pub const DEFAULT_ICON: &'static str = "MessageSquare";
    pub const NAME_MAX_LEN: usize = 100;

    /// Create a new, empty category
    pub fn new(
        name: &str,
        description: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > Self::NAME_MAX_LEN {
            return Err(DomainError::ValidationError(format!(
                "Category name must be between 1 and {} characters",
                Self::NAME_MAX_LEN
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.filter(|d| !d.trim().is_empty()),
            color: color.unwrap_or_else(|| Self::DEFAULT_COLOR.to_string()),
            icon: icon.unwrap_or_else(|| Self::DEFAULT_ICON.to_string()),
            topics_count: 0,
            posts_count: 0,
            created_at: now,
            updated_at: now,
        })
    }
}
