//! Author hydration
//!
//! Every listing shows its authors with role badge and effective tags. The
//! directory loads users, roles and tags for a whole page in three queries
//! instead of per row.

use std::collections::HashMap;

use chrono::Utc;
use forum_core::entities::{Role, User};
use tracing::instrument;

use crate::dto::{AuthorResponse, RoleBadge, TagBadge};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authors of one response, keyed by user ID
#[derive(Debug, Default)]
pub struct AuthorDirectory {
    authors: HashMap<i64, AuthorResponse>,
}

impl AuthorDirectory {
    /// Load the given users. `with_permissions` adds the capability set to role badges.
    #[instrument(skip(ctx, ids))]
    pub async fn load(
        ctx: &ServiceContext,
        ids: impl IntoIterator<Item = i64>,
        with_permissions: bool,
    ) -> ServiceResult<Self> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(Self::default());
        }

        let users = ctx.user_repo().find_by_ids(&ids).await?;
        Self::for_users(ctx, &users, with_permissions).await
    }

    /// Hydrate already loaded users
    pub async fn for_users(
        ctx: &ServiceContext,
        users: &[User],
        with_permissions: bool,
    ) -> ServiceResult<Self> {
        if users.is_empty() {
            return Ok(Self::default());
        }

        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let roles = ctx.role_repo().find_all().await?;
        let tags = ctx.tag_repo().effective_for_users(&ids, Utc::now()).await?;

        let mut tags_by_user: HashMap<i64, Vec<TagBadge>> = HashMap::new();
        for user_tag in &tags {
            tags_by_user
                .entry(user_tag.user_id)
                .or_default()
                .push(TagBadge::from(&user_tag.tag));
        }

        let default_role = default_role(&roles);
        let authors = users
            .iter()
            .map(|user| {
                let role = user
                    .role_id
                    .and_then(|id| roles.iter().find(|r| r.id == id))
                    .or(default_role)
                    .map(|role| RoleBadge::from_role(role, with_permissions));

                let author = AuthorResponse {
                    id: user.id,
                    username: user.username.clone(),
                    minecraft_username: user.minecraft_username.clone(),
                    avatar: user.avatar.clone(),
                    role,
                    tags: tags_by_user.remove(&user.id).unwrap_or_default(),
                };
                (user.id, author)
            })
            .collect();

        Ok(Self { authors })
    }

    /// Author for a user ID, or a placeholder if the row is gone
    pub fn get(&self, user_id: i64) -> AuthorResponse {
        self.authors
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| AuthorResponse::unknown(user_id))
    }
}

/// Lowest hierarchy level wins, ties broken by ID
pub(crate) fn default_role(roles: &[Role]) -> Option<&Role> {
    roles.iter().min_by_key(|r| (r.hierarchy_level, r.id))
}
