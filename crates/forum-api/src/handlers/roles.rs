//! Role handlers

use axum::extract::{Path, State};
use forum_service::{
    AssignRoleRequest, DataBody, MessageBody, RoleResponse, RoleService, UserRolesTagsResponse,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

/// GET /roles
pub async fn list_roles(
    State(state): State<AppState>,
) -> ApiResult<ApiJson<DataBody<Vec<RoleResponse>>>> {
    let service = RoleService::new(state.service_context());
    Ok(ApiJson(service.list().await?))
}

/// Assign a role to a user, replacing any current one
///
/// POST /roles/assign
pub async fn assign_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AssignRoleRequest>,
) -> ApiResult<ApiJson<MessageBody>> {
    let service = RoleService::new(state.service_context());
    Ok(ApiJson(service.assign(auth.user_id, request).await?))
}

/// Effective role and active tags of a user
///
/// GET /users/{user_id}/roles-tags
pub async fn get_user_roles_tags(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<ApiJson<DataBody<UserRolesTagsResponse>>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid userId format"))?;

    let service = RoleService::new(state.service_context());
    Ok(ApiJson(service.user_roles_and_tags(user_id).await?))
}
