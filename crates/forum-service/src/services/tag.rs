//! Tag service
//!
//! Tags are cosmetic badges. Assignments are never deleted: removing a tag
//! moves the assignment to `Revoked`, and assigning again reactivates it.

use chrono::Utc;
use forum_core::entities::{NewTag, Tag, TagCategory};
use forum_core::{DomainError, Permissions};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    AssignTagRequest, CreateTagRequest, DataBody, MessageBody, MessageDataBody,
    TagAssignmentResponse, TagListQuery, TagResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Tag service
pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    /// Create a new TagService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active tags, optionally of one category
    #[instrument(skip(self))]
    pub async fn list(&self, query: &TagListQuery) -> ServiceResult<DataBody<Vec<TagResponse>>> {
        let category = match query.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_category(raw)?),
        };

        let tags = self.ctx.tag_repo().find_active(category).await?;
        Ok(DataBody::new(tags.into_iter().map(TagResponse::from).collect()))
    }

    /// Create a tag (requires `manage_tags`)
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        actor_id: i64,
        request: CreateTagRequest,
    ) -> ServiceResult<MessageDataBody<TagResponse>> {
        request.validate()?;

        PermissionService::new(self.ctx)
            .require_permission(actor_id, Permissions::MANAGE_TAGS)
            .await?;

        let new_tag = NewTag {
            name: request.name.trim().to_lowercase(),
            display_name: request.display_name.trim().to_string(),
            description: request.description.filter(|d| !d.trim().is_empty()),
            color: request.color.unwrap_or_else(|| Tag::DEFAULT_COLOR.to_string()),
            icon: request.icon.filter(|i| !i.is_empty()),
            category: parse_category(&request.category)?,
        };

        let tag = match self.ctx.tag_repo().create(&new_tag).await {
            Ok(tag) => tag,
            Err(DomainError::TagNameTaken(name)) => {
                return Err(ServiceError::conflict(format!("Tag name already in use: {name}")));
            }
            Err(e) => return Err(e.into()),
        };

        info!(tag_id = tag.id, name = %tag.name, actor_id, "Tag created");
        Ok(MessageDataBody {
            message: "Tag created successfully".to_string(),
            data: TagResponse::from(tag),
        })
    }

    /// Assign (or reactivate) a tag for a user (requires `manage_tags`)
    #[instrument(skip(self, request), fields(user_id = request.user_id, tag_id = request.tag_id))]
    pub async fn assign(
        &self,
        actor_id: i64,
        request: AssignTagRequest,
    ) -> ServiceResult<MessageDataBody<TagAssignmentResponse>> {
        request.validate()?;

        let permissions = PermissionService::new(self.ctx);
        permissions
            .require_permission(actor_id, Permissions::MANAGE_TAGS)
            .await?;

        if request.expires_at.is_some_and(|at| at <= Utc::now()) {
            return Err(ServiceError::validation("expiresAt must be in the future"));
        }

        let tag = self
            .ctx
            .tag_repo()
            .find_by_id(request.tag_id)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| ServiceError::not_found("Tag", request.tag_id.to_string()))?;
        let user = permissions.load_user(request.user_id).await?;

        let assignment = self
            .ctx
            .tag_repo()
            .assign(user.id, tag.id, Some(actor_id), request.expires_at)
            .await?;

        info!(
            user_id = user.id,
            tag = %tag.name,
            actor_id,
            expires_at = ?assignment.expires_at,
            "Tag assigned"
        );
        Ok(MessageDataBody {
            message: "Tag assigned successfully".to_string(),
            data: TagAssignmentResponse::from(assignment),
        })
    }

    /// Revoke a tag assignment (requires `manage_tags`)
    #[instrument(skip(self))]
    pub async fn remove(&self, actor_id: i64, user_id: i64, tag_id: i32) -> ServiceResult<MessageBody> {
        PermissionService::new(self.ctx)
            .require_permission(actor_id, Permissions::MANAGE_TAGS)
            .await?;

        self.ctx
            .tag_repo()
            .revoke(user_id, tag_id)
            .await?
            .ok_or(DomainError::TagAssignmentNotFound { user_id, tag_id })?;

        info!(user_id, tag_id, actor_id, "Tag revoked");
        Ok(MessageBody::new("Tag removed successfully"))
    }
}

fn parse_category(raw: &str) -> ServiceResult<TagCategory> {
    raw.trim()
        .parse::<TagCategory>()
        .map_err(|_| ServiceError::validation(format!("Invalid tag category: {raw}")))
}
