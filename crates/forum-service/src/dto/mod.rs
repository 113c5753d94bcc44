//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AssignRoleRequest, AssignTagRequest, CreateCategoryRequest, CreatePostRequest,
    CreateTagRequest, CreateTopicRequest, ReactRequest, TagListQuery, TopicListQuery,
    UpdateTopicRequest, UserListQuery,
};

pub use responses::{
    AuthorResponse, CategoriesBody, CategoryCreated, CategoryResponse, CategorySummary, DataBody,
    DislikeToggled, LastPostResponse, LikeToggled, MessageBody, MessageDataBody, PaginationMeta,
    PostCreated, PostResponse, ReactToggled, ReactionSummaryResponse, ReactionTypeBrief,
    ReactionTypeResponse, ReactionTypesBody, ReactionsBody, RoleBadge, RoleResponse,
    TagAssignmentResponse, TagBadge, TagResponse, TopicBody, TopicDetail, TopicPage,
    TopicResponse, UserListResponse, UserResponse, UserRolesTagsResponse, UserTagResponse,
};
