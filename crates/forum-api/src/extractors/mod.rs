//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and path IDs.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{IdPath, UserTagPath};
pub use validated::ValidatedJson;
