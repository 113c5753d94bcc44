//! Request DTOs for API endpoints
//!
//! Field names are camelCase on the wire. Length rules that depend on
//! trimming (titles, content) are enforced by the entities, not here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Forum Requests
// ============================================================================

/// Create category request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// Hex color such as `#3B82F6`
    #[validate(length(equal = 7, message = "Color must be a #RRGGBB hex value"))]
    pub color: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Icon must be 1-50 characters"))]
    pub icon: Option<String>,
}

/// Create topic request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Moderation flags for a topic
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    pub is_locked: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl UpdateTopicRequest {
    pub fn is_empty(&self) -> bool {
        self.is_locked.is_none() && self.is_pinned.is_none()
    }
}

/// Reply to a topic
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
}

/// Named reaction toggle
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    #[validate(required(message = "reactionTypeId is required"))]
    pub reaction_type_id: Option<i32>,
}

// ============================================================================
// Role / Tag Requests
// ============================================================================

/// Assign a role to a user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    #[validate(range(min = 1, message = "userId must be positive"))]
    pub user_id: i64,
    #[validate(range(min = 1, message = "roleId must be positive"))]
    pub role_id: i32,
}

/// Create a tag
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    pub description: Option<String>,

    #[validate(length(equal = 7, message = "Color must be a #RRGGBB hex value"))]
    pub color: Option<String>,

    #[validate(length(max = 50, message = "Icon must be at most 50 characters"))]
    pub icon: Option<String>,

    /// One of `staff`, `special`, `achievement`, `custom`
    #[serde(default = "default_tag_category")]
    pub category: String,
}

fn default_tag_category() -> String {
    "custom".to_string()
}

/// Grant a tag to a user
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTagRequest {
    #[validate(range(min = 1, message = "userId must be positive"))]
    pub user_id: i64,
    #[validate(range(min = 1, message = "tagId must be positive"))]
    pub tag_id: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Topic listing filters (pagination is extracted separately)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicListQuery {
    /// Category UUID or `all`
    pub category_id: Option<String>,
    pub search: Option<String>,
}

/// User directory filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub tag: Option<String>,
}

/// Tag listing filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListQuery {
    pub category: Option<String>,
}
