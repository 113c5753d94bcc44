//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{categories, health, posts, reactions, roles, tags, topics, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes, exported separately to bypass rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/forum", forum_routes())
        .merge(role_routes())
        .merge(tag_routes())
        .merge(user_routes())
}

/// Categories, topics, posts and reactions
fn forum_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/topics", get(topics::list_topics).post(topics::create_topic))
        .route("/topics/:id", get(topics::get_topic).patch(topics::update_topic))
        .route("/topics/:id/posts", post(posts::create_post))
        // Reactions
        .route("/reaction-types", get(reactions::list_reaction_types))
        .route("/posts/:id/like", post(reactions::like_post))
        .route("/posts/:id/dislike", post(reactions::dislike_post))
        .route("/posts/:id/react", post(reactions::react_to_post))
        .route("/posts/:id/reactions", get(reactions::get_post_reactions))
}

fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/roles", get(roles::list_roles))
        .route("/roles/assign", post(roles::assign_role))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/tags/assign", post(tags::assign_tag))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:user_id/roles-tags", get(roles::get_user_roles_tags))
        .route("/users/:user_id/tags/:tag_id", delete(tags::remove_tag))
}
