//! Reaction handlers
//!
//! Like/dislike votes and named reactions on posts.

use axum::extract::State;
use forum_service::{
    DislikeToggled, LikeToggled, ReactRequest, ReactToggled, ReactionService, ReactionTypesBody,
    ReactionsBody,
};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Toggle a like
///
/// POST /forum/posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<LikeToggled>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.like(post_id, auth.user_id).await?))
}

/// Toggle a dislike
///
/// POST /forum/posts/{id}/dislike
pub async fn dislike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<DislikeToggled>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.dislike(post_id, auth.user_id).await?))
}

/// Toggle a named reaction
///
/// POST /forum/posts/{id}/react
pub async fn react_to_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<ApiJson<ReactToggled>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.react(post_id, auth.user_id, request).await?))
}

/// Active reaction types
///
/// GET /forum/reaction-types
pub async fn list_reaction_types(
    State(state): State<AppState>,
) -> ApiResult<ApiJson<ReactionTypesBody>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.reaction_types().await?))
}

/// Reaction summary for a post; flags the viewer's own reactions when signed in
///
/// GET /forum/posts/{id}/reactions
pub async fn get_post_reactions(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<ApiJson<ReactionsBody>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.post_reactions(post_id, viewer.user_id()).await?))
}
