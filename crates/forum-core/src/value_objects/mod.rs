//! Value objects - immutable types that represent domain concepts

mod pagination;
mod permissions;

pub use pagination::{PageInfo, PageRequest};
pub use permissions::Permissions;
