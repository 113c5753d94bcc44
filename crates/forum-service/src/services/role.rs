//! Role service

use chrono::Utc;
use forum_core::Permissions;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    AssignRoleRequest, DataBody, MessageBody, RoleResponse, UserRolesTagsResponse, UserTagResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All roles, highest hierarchy first
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<DataBody<Vec<RoleResponse>>> {
        let roles = self.ctx.role_repo().find_all().await?;
        Ok(DataBody::new(roles.into_iter().map(RoleResponse::from).collect()))
    }

    /// Give a user a new role (requires `manage_roles`)
    #[instrument(skip(self, request), fields(user_id = request.user_id, role_id = request.role_id))]
    pub async fn assign(&self, actor_id: i64, request: AssignRoleRequest) -> ServiceResult<MessageBody> {
        request.validate()?;

        PermissionService::new(self.ctx)
            .require_permission(actor_id, Permissions::MANAGE_ROLES)
            .await?;

        self.ctx
            .role_repo()
            .assign(request.user_id, request.role_id, Some(actor_id))
            .await?;

        info!(
            user_id = request.user_id,
            role_id = request.role_id,
            actor_id,
            "Role assigned"
        );
        Ok(MessageBody::new("Role assigned successfully"))
    }

    /// Effective role and tags of a user
    #[instrument(skip(self))]
    pub async fn user_roles_and_tags(
        &self,
        user_id: i64,
    ) -> ServiceResult<DataBody<UserRolesTagsResponse>> {
        let permissions = PermissionService::new(self.ctx);
        let user = permissions.load_user(user_id).await?;
        let role = permissions
            .resolve_role(&user)
            .await?
            .ok_or_else(|| ServiceError::internal("No roles are configured"))?;

        let tags = self
            .ctx
            .tag_repo()
            .effective_for_users(&[user_id], Utc::now())
            .await?;

        Ok(DataBody::new(UserRolesTagsResponse {
            role: RoleResponse::from(role),
            tags: tags.into_iter().map(UserTagResponse::from).collect(),
        }))
    }
}
