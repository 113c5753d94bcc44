//! Permission service
//!
//! Resolves the capability set of the acting user from their forum role.
//! A user without a role (or whose role was deleted) falls back to the
//! lowest-hierarchy role.

use forum_core::entities::{Role, User};
use forum_core::Permissions;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a user or fail with NotFound
    pub async fn load_user(&self, user_id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Effective role of a user, `None` only when no roles exist at all
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn resolve_role(&self, user: &User) -> ServiceResult<Option<Role>> {
        if let Some(role_id) = user.role_id {
            if let Some(role) = self.ctx.role_repo().find_by_id(role_id).await? {
                return Ok(Some(role));
            }
        }
        Ok(self.ctx.role_repo().find_default().await?)
    }

    /// Capability set of a user
    #[instrument(skip(self))]
    pub async fn permissions_of(&self, user_id: i64) -> ServiceResult<Permissions> {
        let user = self.load_user(user_id).await?;
        let permissions = self
            .resolve_role(&user)
            .await?
            .map_or_else(Permissions::empty, |role| role.permissions);

        debug!(user_id, permissions = %permissions, "Resolved permissions");
        Ok(permissions)
    }

    /// Check if a user holds a capability
    #[instrument(skip(self))]
    pub async fn check_permission(&self, user_id: i64, permission: Permissions) -> ServiceResult<bool> {
        Ok(self.permissions_of(user_id).await?.has(permission))
    }

    /// Check a capability and return error if denied
    #[instrument(skip(self))]
    pub async fn require_permission(&self, user_id: i64, permission: Permissions) -> ServiceResult<()> {
        if !self.check_permission(user_id, permission).await? {
            return Err(ServiceError::permission_denied(permission.list().join(", ")));
        }
        Ok(())
    }
}
