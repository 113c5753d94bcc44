//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::response::ApiError;

/// A UUID from the `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        parse_uuid(&raw).map(IdPath)
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_path(format!("Invalid id format: {raw}")))
}

/// `/users/:user_id/...` segments
#[derive(Debug, Deserialize)]
pub struct UserTagPath {
    pub user_id: String,
    pub tag_id: String,
}

impl UserTagPath {
    pub fn user_id(&self) -> Result<i64, ApiError> {
        self.user_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid userId format"))
    }

    pub fn tag_id(&self) -> Result<i32, ApiError> {
        self.tag_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid tagId format"))
    }
}
