//! Domain entities - core business objects

mod category;
mod post;
mod reaction;
mod role;
mod tag;
mod topic;
mod user;

pub use category::Category;
pub use post::Post;
pub use reaction::{
    Reaction, ReactionKind, ReactionSummary, ReactionToggle, ReactionType, ToggleOutcome, Vote,
    VoteOutcome, VoteSlot,
};
pub use role::{AssignmentState, Role, RoleAssignment};
pub use tag::{NewTag, Tag, TagAssignment, TagCategory, UserTag};
pub use topic::{Topic, TopicStatus};
pub use user::{NewUser, User};
