//! # forum-service
//!
//! Application layer: forum business logic, permission checks and DTOs.
//! Storage is reached through the `forum-core` repository traits only.

pub mod dto;
pub mod services;

pub use dto::*;

pub use services::{
    CategoryService, PermissionService, PostService, ReactionService, RoleService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TagService, TopicService, UserService,
};
