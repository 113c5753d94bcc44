//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Topic not found: {0}")]
    TopicNotFound(Uuid),

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Role not found: {0}")]
    RoleNotFound(i32),

    #[error("Tag not found: {0}")]
    TagNotFound(i32),

    #[error("Tag {tag_id} is not assigned to user {user_id}")]
    TagAssignmentNotFound { user_id: i64, tag_id: i32 },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Title must be between {min} and {max} characters")]
    InvalidTitleLength { min: usize, max: usize },

    #[error("Content must be at least {min} characters")]
    ContentTooShort { min: usize },

    #[error("Invalid topic tag: {0}")]
    InvalidTopicTag(String),

    #[error("Invalid or inactive reaction type: {0}")]
    InvalidReactionType(i32),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Topic is locked: {0}")]
    TopicLocked(Uuid),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Tag name already in use: {0}")]
    TagNameTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::TopicNotFound(_) => "UNKNOWN_TOPIC",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::RoleNotFound(_) => "UNKNOWN_ROLE",
            Self::TagNotFound(_) => "UNKNOWN_TAG",
            Self::TagAssignmentNotFound { .. } => "UNKNOWN_TAG_ASSIGNMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidTitleLength { .. } => "INVALID_TITLE_LENGTH",
            Self::ContentTooShort { .. } => "CONTENT_TOO_SHORT",
            Self::InvalidTopicTag(_) => "INVALID_TOPIC_TAG",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::TopicLocked(_) => "TOPIC_LOCKED",

            // Conflict
            Self::TagNameTaken(_) => "TAG_NAME_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::TopicNotFound(_)
                | Self::PostNotFound(_)
                | Self::RoleNotFound(_)
                | Self::TagNotFound(_)
                | Self::TagAssignmentNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidTitleLength { .. }
                | Self::ContentTooShort { .. }
                | Self::InvalidTopicTag(_)
                | Self::InvalidReactionType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_) | Self::TopicLocked(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TagNameTaken(_))
    }
}
