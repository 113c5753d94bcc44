//! # forum-common
//!
//! Shared utilities including configuration, error handling, token validation, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use self::auth::{Claims, JwtService, TokenType};
pub use self::config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, ForumConfig,
    JwtConfig, RateLimitConfig, ServerConfig,
};
pub use self::error::{AppError, AppResult, ErrorResponse};
pub use self::telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
