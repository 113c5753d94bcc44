//! Business logic services
//!
//! Each service borrows the shared `ServiceContext`, checks the acting user's
//! capabilities and orchestrates the repositories.

mod authors;
pub mod category;
pub mod context;
pub mod error;
pub mod permission;
pub mod post;
pub mod reaction;
pub mod role;
pub mod tag;
pub mod topic;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use authors::AuthorDirectory;
pub use category::CategoryService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use permission::PermissionService;
pub use post::PostService;
pub use reaction::ReactionService;
pub use role::RoleService;
pub use tag::TagService;
pub use topic::TopicService;
pub use user::UserService;
