//! Database models - SQLx-compatible structs for PostgreSQL tables

mod category;
mod post;
mod reaction;
mod role;
mod tag;
mod topic;
mod user;

pub use category::CategoryModel;
pub use post::PostModel;
pub use reaction::{ReactionSummaryModel, ReactionTypeModel};
pub use role::RoleModel;
pub use tag::{TagAssignmentModel, TagModel, UserTagModel};
pub use topic::TopicModel;
pub use user::UserModel;
