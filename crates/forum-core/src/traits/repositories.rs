//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method that touches more than one row
//! is expected to run as a single transaction in the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Category, NewTag, NewUser, Post, Reaction, ReactionSummary, ReactionType, Role, Tag,
    TagAssignment, TagCategory, ToggleOutcome, Topic, User, UserTag, Vote,
};
use crate::error::DomainError;
use crate::value_objects::PageRequest;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Filters for the user directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Role name
    pub role: Option<String>,
    /// Tag name, matched against effective assignments only
    pub tag: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find several users at once (missing IDs are skipped)
    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<User>>;

    /// Insert a user row
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// List users ordered by role hierarchy (highest first), then username
    async fn find_page(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Vec<User>>;

    /// Count users matching the filter
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Category>>;

    /// All categories ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Category>>;

    /// Create a new category
    async fn create(&self, category: &Category) -> RepoResult<()>;

    /// Newest topic of every category that has one
    async fn latest_topics(&self) -> RepoResult<Vec<Topic>>;
}

// ============================================================================
// Topic Repository
// ============================================================================

/// Filters for topic listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring of title or content
    pub search: Option<String>,
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Find topic by ID without touching the view counter
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Topic>>;

    /// Increment the view counter and return the updated topic in one statement
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Topic>>;

    /// List topics: pinned first, then most recently updated
    async fn find_page(&self, filter: &TopicFilter, page: PageRequest) -> RepoResult<Vec<Topic>>;

    /// Count topics matching the filter
    async fn count(&self, filter: &TopicFilter) -> RepoResult<i64>;

    /// Insert a topic with its tags and bump the category's topic counter
    async fn create(&self, topic: &Topic) -> RepoResult<()>;

    /// Set the lock and pin flags in one statement; `None` keeps the current value
    async fn set_flags(
        &self,
        id: Uuid,
        locked: Option<bool>,
        pinned: Option<bool>,
    ) -> RepoResult<Topic>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;

    /// Posts of a topic, oldest first
    async fn find_by_topic(&self, topic_id: Uuid, page: PageRequest) -> RepoResult<Vec<Post>>;

    /// Count posts of a topic
    async fn count_by_topic(&self, topic_id: Uuid) -> RepoResult<i64>;

    /// Insert a post under an open topic and bump the reply counters.
    ///
    /// Fails with `TopicNotFound` or `TopicLocked`; the lock flag is checked
    /// while the topic row is locked.
    async fn create(&self, post: &Post) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Active reaction types ordered by ID
    async fn find_active_types(&self) -> RepoResult<Vec<ReactionType>>;

    /// Find a reaction type by ID, active or not
    async fn find_type(&self, id: i32) -> RepoResult<Option<ReactionType>>;

    /// Vote currently held by a user on a post
    async fn find_vote(&self, post_id: Uuid, user_id: i64) -> RepoResult<Option<Vote>>;

    /// Toggle a reaction and adjust the post counters atomically.
    ///
    /// A vote replaces the conflicting vote held by the same user, named
    /// reactions coexist. Fails with `PostNotFound`, or `InvalidReactionType`
    /// when a named type is missing or inactive.
    async fn toggle(&self, reaction: &Reaction) -> RepoResult<ToggleOutcome>;

    /// Per-type counts for a post, most used first.
    ///
    /// Types with no reactions are omitted unless the viewer holds them.
    async fn summarize(&self, post_id: Uuid, viewer: Option<i64>)
        -> RepoResult<Vec<ReactionSummary>>;

    /// Number of named reaction rows on a post
    async fn count_reactions(&self, post_id: Uuid) -> RepoResult<i64>;
}

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// All roles, highest hierarchy first
    async fn find_all(&self) -> RepoResult<Vec<Role>>;

    /// Find role by ID
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Role>>;

    /// Role used for users without an explicit role (lowest hierarchy)
    async fn find_default(&self) -> RepoResult<Option<Role>>;

    /// Set a user's role and record an audit row
    async fn assign(&self, user_id: i64, role_id: i32, assigned_by: Option<i64>) -> RepoResult<()>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Active tags ordered by category then display name
    async fn find_active(&self, category: Option<TagCategory>) -> RepoResult<Vec<Tag>>;

    /// Find tag by ID, active or not
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Tag>>;

    /// Create a tag; fails with `TagNameTaken` on a duplicate name
    async fn create(&self, tag: &NewTag) -> RepoResult<Tag>;

    /// Upsert an assignment to `Active`, refreshing assigner, time and expiry
    async fn assign(
        &self,
        user_id: i64,
        tag_id: i32,
        assigned_by: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> RepoResult<TagAssignment>;

    /// Move an assignment to `Revoked`; `None` when it never existed
    async fn revoke(&self, user_id: i64, tag_id: i32) -> RepoResult<Option<TagAssignment>>;

    /// Effective assignments (active tag, active row, not expired) of several users
    async fn effective_for_users(&self, user_ids: &[i64], now: DateTime<Utc>)
        -> RepoResult<Vec<UserTag>>;
}
