//! Category handlers

use axum::extract::State;
use forum_service::{CategoriesBody, CategoryCreated, CategoryService, CreateCategoryRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List categories with their latest topic
///
/// GET /forum/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<ApiJson<CategoriesBody>> {
    let service = CategoryService::new(state.service_context());
    Ok(ApiJson(service.list().await?))
}

/// Create a category
///
/// POST /forum/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<Created<ApiJson<CategoryCreated>>> {
    let service = CategoryService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(ApiJson(response)))
}
