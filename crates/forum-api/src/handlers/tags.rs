//! Tag handlers

use axum::extract::{Path, Query, State};
use forum_service::{
    AssignTagRequest, CreateTagRequest, DataBody, MessageBody, MessageDataBody,
    TagAssignmentResponse, TagListQuery, TagResponse, TagService,
};

use crate::extractors::{AuthUser, UserTagPath, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Active tags, optionally filtered by category
///
/// GET /tags?category
pub async fn list_tags(
    State(state): State<AppState>,
    query: Result<Query<TagListQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<ApiJson<DataBody<Vec<TagResponse>>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = TagService::new(state.service_context());
    Ok(ApiJson(service.list(&query).await?))
}

/// POST /tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTagRequest>,
) -> ApiResult<Created<ApiJson<MessageDataBody<TagResponse>>>> {
    let service = TagService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// Grant a tag to a user, optionally until `expiresAt`
///
/// POST /tags/assign
pub async fn assign_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AssignTagRequest>,
) -> ApiResult<ApiJson<MessageDataBody<TagAssignmentResponse>>> {
    let service = TagService::new(state.service_context());
    Ok(ApiJson(service.assign(auth.user_id, request).await?))
}

/// Revoke a tag from a user
///
/// DELETE /users/{user_id}/tags/{tag_id}
pub async fn remove_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserTagPath>,
) -> ApiResult<ApiJson<MessageBody>> {
    let service = TagService::new(state.service_context());
    let response = service
        .remove(auth.user_id, path.user_id()?, path.tag_id()?)
        .await?;
    Ok(ApiJson(response))
}
