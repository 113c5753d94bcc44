//! Response DTOs for API endpoints
//!
//! Resource views (`*Response`) and endpoint bodies (`*Body`, `*Created`, ...).
//! Bodies are wrapped by the API layer in `{"success": true, ...}`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use forum_core::value_objects::{PageInfo, Permissions};

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-number pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageInfo> for PaginationMeta {
    fn from(info: PageInfo) -> Self {
        Self {
            page: info.page,
            limit: info.limit,
            total: info.total,
            total_pages: info.total_pages,
            has_next: info.has_next,
            has_prev: info.has_prev,
        }
    }
}

/// `{ "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

impl<T> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "message": ..., "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageDataBody<T> {
    pub message: String,
    pub data: T,
}

// ============================================================================
// Author Responses
// ============================================================================

/// Role badge shown next to an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBadge {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub color: String,
    /// Only included where the client needs it (post listings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

/// Tag badge shown next to an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBadge {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub color: String,
    pub icon: Option<String>,
    pub category: String,
}

/// Author with role badge and effective tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
    pub minecraft_username: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<RoleBadge>,
    pub tags: Vec<TagBadge>,
}

impl AuthorResponse {
    /// Placeholder for an author row that no longer exists
    pub fn unknown(id: i64) -> Self {
        Self {
            id,
            username: "unknown".to_string(),
            minecraft_username: None,
            avatar: None,
            role: None,
            tags: Vec::new(),
        }
    }
}

// ============================================================================
// Forum Responses
// ============================================================================

/// Category summary embedded in topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Newest topic of a category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPostResponse {
    pub topic_id: Uuid,
    pub topic_title: String,
    pub created_at: DateTime<Utc>,
    pub user: AuthorResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub topics_count: i32,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_post: Option<LastPostResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub category: Option<CategorySummary>,
    pub user_id: i64,
    pub user: AuthorResponse,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i32,
    pub replies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub user_id: i64,
    pub user: AuthorResponse,
    pub content: String,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub likes: i32,
    pub dislikes: i32,
    pub reports: i32,
    pub reactions_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesBody {
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCreated {
    pub message: String,
    pub category: CategoryResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicPage {
    pub topics: Vec<TopicResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicDetail {
    pub topic: TopicResponse,
    pub posts: Vec<PostResponse>,
    pub pagination: PaginationMeta,
}

/// Topic created or moderated
#[derive(Debug, Clone, Serialize)]
pub struct TopicBody {
    pub message: String,
    pub topic: TopicResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCreated {
    pub message: String,
    pub post: PostResponse,
}

// ============================================================================
// Reaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LikeToggled {
    pub message: String,
    pub liked: bool,
    pub likes: i32,
    pub dislikes: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DislikeToggled {
    pub message: String,
    pub disliked: bool,
    pub likes: i32,
    pub dislikes: i32,
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionTypeResponse {
    pub id: i32,
    pub emoji: String,
    pub name: String,
    pub description: Option<String>,
}

/// Reaction type echoed back after a toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionTypeBrief {
    pub id: i32,
    pub emoji: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummaryResponse {
    pub reaction_type_id: i32,
    pub emoji: String,
    pub name: String,
    pub count: i64,
    pub user_reacted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionTypesBody {
    pub reaction_types: Vec<ReactionTypeResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactToggled {
    pub message: String,
    pub reacted: bool,
    pub reaction_type: ReactionTypeBrief,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionsBody {
    pub reactions: Vec<ReactionSummaryResponse>,
}

// ============================================================================
// Role / Tag / User Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub permissions: Permissions,
    pub hierarchy_level: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: Option<String>,
    pub category: String,
    pub is_active: bool,
}

/// Effective tag of a user with its assignment metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTagResponse {
    #[serde(flatten)]
    pub tag: TagResponse,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAssignmentResponse {
    pub user_id: i64,
    pub tag_id: i32,
    pub assigned_by: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub state: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRolesTagsResponse {
    pub role: RoleResponse,
    pub tags: Vec<UserTagResponse>,
}

/// Directory entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(flatten)]
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use forum_core::value_objects::PageRequest;
    use serde_json::json;

    #[test]
    fn test_pagination_meta_shape() {
        let meta = PaginationMeta::from(PageInfo::new(PageRequest::new(3, 20), 45));
        let value = serde_json::to_value(meta).unwrap();
        assert_eq!(
            value,
            json!({
                "page": 3,
                "limit": 20,
                "total": 45,
                "totalPages": 3,
                "hasNext": false,
                "hasPrev": true
            })
        );
    }

    #[test]
    fn test_role_badge_hides_missing_permissions() {
        let badge = RoleBadge {
            id: 1,
            name: "player".to_string(),
            display_name: "Player".to_string(),
            color: "#6B7280".to_string(),
            permissions: None,
        };
        let value = serde_json::to_value(&badge).unwrap();
        assert!(value.get("permissions").is_none());
        assert_eq!(value["displayName"], "Player");
    }

    #[test]
    fn test_react_toggled_shape() {
        let body = ReactToggled {
            message: "Reaction added".to_string(),
            reacted: true,
            reaction_type: ReactionTypeBrief {
                id: 5,
                emoji: "😮".to_string(),
                name: "wow".to_string(),
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["reactionType"]["name"], "wow");
        assert_eq!(value["reacted"], true);
    }
}
