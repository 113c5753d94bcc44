//! Post handlers

use axum::extract::State;
use forum_service::{CreatePostRequest, PostCreated, PostService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Reply to a topic
///
/// POST /forum/topics/{id}/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(topic_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<ApiJson<PostCreated>>> {
    let service = PostService::new(state.service_context());
    let response = service.create(auth.user_id, topic_id, request).await?;
    Ok(Created(ApiJson(response)))
}
