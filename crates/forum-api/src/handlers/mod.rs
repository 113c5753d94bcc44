//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod categories;
pub mod health;
pub mod posts;
pub mod reactions;
pub mod roles;
pub mod tags;
pub mod topics;
pub mod users;

use axum::http::Uri;

use crate::response::ApiError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
