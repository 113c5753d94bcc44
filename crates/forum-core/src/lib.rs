//! # forum-core
//!
//! Domain layer containing entities, value objects and repository traits for the forum.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AssignmentState, Category, NewTag, NewUser, Post, Reaction, ReactionKind, ReactionSummary,
    ReactionToggle, ReactionType, Role, RoleAssignment, Tag, TagAssignment, TagCategory,
    ToggleOutcome, Topic, TopicStatus, User, UserTag, Vote, VoteOutcome, VoteSlot,
};
pub use error::DomainError;
pub use traits::{
    CategoryRepository, PostRepository, ReactionRepository, RepoResult, RoleRepository,
    TagRepository, TopicFilter, TopicRepository, UserFilter, UserRepository,
};
pub use value_objects::{PageInfo, PageRequest, Permissions};
