//! User directory handlers

use axum::extract::{Query, State};
use forum_service::{DataBody, UserListQuery, UserListResponse, UserService};

use crate::extractors::Pagination;
use crate::response::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

/// Users with their role and active tags
///
/// GET /users?page&limit&role&tag
pub async fn list_users(
    State(state): State<AppState>,
    pagination: Pagination,
    query: Result<Query<UserListQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<ApiJson<DataBody<UserListResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let page = pagination.request(state.config().forum.users_page_size);

    let service = UserService::new(state.service_context());
    Ok(ApiJson(service.list(&query, page).await?))
}
