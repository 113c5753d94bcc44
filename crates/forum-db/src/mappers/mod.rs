//! Entity to model mappers
//!
//! - `From<Model> for Entity` / `TryFrom` where a text column encodes an enum
//! - `*Insert` structs: prepare entity data for database operations

mod category;
mod post;
mod reaction;
mod role;
mod tag;
mod topic;
mod user;

pub use category::CategoryInsert;
pub use post::PostInsert;
pub use topic::TopicInsert;
