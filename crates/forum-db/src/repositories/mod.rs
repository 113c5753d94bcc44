//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.

mod category;
mod error;
mod post;
mod query;
mod reaction;
mod role;
mod tag;
mod topic;
mod user;

pub use category::PgCategoryRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
pub use role::PgRoleRepository;
pub use tag::PgTagRepository;
pub use topic::PgTopicRepository;
pub use user::PgUserRepository;
