//! # forum-api
//!
//! REST API server built with the Axum framework. Every route lives under
//! `/api` and answers with a `{success, ...}` JSON envelope.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
