//! Topic handlers
//!
//! Listing, reading and moderating threads.

use axum::extract::{Query, State};
use forum_service::{
    CreateTopicRequest, TopicBody, TopicDetail, TopicListQuery, TopicPage, TopicService,
    UpdateTopicRequest,
};

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List topics, pinned first
///
/// GET /forum/topics?categoryId&search&page&limit
pub async fn list_topics(
    State(state): State<AppState>,
    pagination: Pagination,
    query: Result<Query<TopicListQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<ApiJson<TopicPage>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let page = pagination.request(state.config().forum.topics_page_size);

    let service = TopicService::new(state.service_context());
    Ok(ApiJson(service.list(&query, page).await?))
}

/// Get a topic with a page of its posts; counts one view
///
/// GET /forum/topics/{id}?page&limit
pub async fn get_topic(
    State(state): State<AppState>,
    IdPath(topic_id): IdPath,
    pagination: Pagination,
) -> ApiResult<ApiJson<TopicDetail>> {
    let page = pagination.request(state.config().forum.posts_page_size);

    let service = TopicService::new(state.service_context());
    Ok(ApiJson(service.get(topic_id, page).await?))
}

/// Start a new topic
///
/// POST /forum/topics
pub async fn create_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTopicRequest>,
) -> ApiResult<Created<ApiJson<TopicBody>>> {
    let service = TopicService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}

/// Lock / pin a topic
///
/// PATCH /forum/topics/{id}
pub async fn update_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(topic_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateTopicRequest>,
) -> ApiResult<ApiJson<TopicBody>> {
    let service = TopicService::new(state.service_context());
    let response = service.update_flags(auth.user_id, topic_id, request).await?;
    Ok(ApiJson(response))
}
