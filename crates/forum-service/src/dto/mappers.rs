//! Entity to DTO mappers
//!
//! Plain `From` conversions. Responses that embed an author are assembled by
//! the services, which batch-load authors first.

use forum_core::entities::{
    Category, Post, ReactionSummary, ReactionType, Role, Tag, TagAssignment, UserTag,
};

use super::responses::{
    AuthorResponse, CategorySummary, PostResponse, ReactionSummaryResponse, ReactionTypeBrief,
    ReactionTypeResponse, RoleBadge, RoleResponse, TagAssignmentResponse, TagBadge, TagResponse,
    UserTagResponse,
};

// ============================================================================
// Category Mappers
// ============================================================================

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostResponse {
    pub fn from_post(post: Post, author: AuthorResponse) -> Self {
        Self {
            id: post.id,
            topic_id: post.topic_id,
            user_id: post.author_id,
            user: author,
            content: post.content,
            is_edited: post.is_edited,
            edited_at: post.edited_at,
            likes: post.likes,
            dislikes: post.dislikes,
            reports: post.reports,
            reactions_count: post.reactions_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionType> for ReactionTypeResponse {
    fn from(reaction_type: ReactionType) -> Self {
        Self {
            id: reaction_type.id,
            emoji: reaction_type.emoji,
            name: reaction_type.name,
            description: reaction_type.description,
        }
    }
}

impl From<ReactionType> for ReactionTypeBrief {
    fn from(reaction_type: ReactionType) -> Self {
        Self {
            id: reaction_type.id,
            emoji: reaction_type.emoji,
            name: reaction_type.name,
        }
    }
}

impl From<ReactionSummary> for ReactionSummaryResponse {
    fn from(summary: ReactionSummary) -> Self {
        Self {
            reaction_type_id: summary.reaction_type_id,
            emoji: summary.emoji,
            name: summary.name,
            count: summary.count,
            user_reacted: summary.user_reacted,
        }
    }
}

// ============================================================================
// Role Mappers
// ============================================================================

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            display_name: role.display_name.clone(),
            description: role.description.clone(),
            color: role.color.clone(),
            permissions: role.permissions,
            hierarchy_level: role.hierarchy_level,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self::from(&role)
    }
}

impl RoleBadge {
    pub fn from_role(role: &Role, with_permissions: bool) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            display_name: role.display_name.clone(),
            color: role.color.clone(),
            permissions: with_permissions.then_some(role.permissions),
        }
    }
}

// ============================================================================
// Tag Mappers
// ============================================================================

impl From<&Tag> for TagBadge {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            display_name: tag.display_name.clone(),
            color: tag.color.clone(),
            icon: tag.icon.clone(),
            category: tag.category.to_string(),
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            display_name: tag.display_name,
            description: tag.description,
            color: tag.color,
            icon: tag.icon,
            category: tag.category.to_string(),
            is_active: tag.is_active,
        }
    }
}

impl From<UserTag> for UserTagResponse {
    fn from(user_tag: UserTag) -> Self {
        Self {
            tag: TagResponse::from(user_tag.tag),
            assigned_at: user_tag.assigned_at,
            expires_at: user_tag.expires_at,
        }
    }
}

impl From<TagAssignment> for TagAssignmentResponse {
    fn from(assignment: TagAssignment) -> Self {
        Self {
            user_id: assignment.user_id,
            tag_id: assignment.tag_id,
            assigned_by: assignment.assigned_by,
            assigned_at: assignment.assigned_at,
            expires_at: assignment.expires_at,
            state: assignment.state.to_string(),
        }
    }
}
