//! User directory service

use forum_core::traits::UserFilter;
use forum_core::value_objects::{PageInfo, PageRequest};
use tracing::instrument;

use crate::dto::{DataBody, PaginationMeta, UserListQuery, UserListResponse, UserResponse};

use super::authors::AuthorDirectory;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// User directory service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Users with role badge and effective tags, highest role first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: &UserListQuery,
        page: PageRequest,
    ) -> ServiceResult<DataBody<UserListResponse>> {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let filter = UserFilter {
            role: non_empty(&query.role),
            tag: non_empty(&query.tag),
        };

        let users = self.ctx.user_repo().find_page(&filter, page).await?;
        let total = self.ctx.user_repo().count(&filter).await?;
        let authors = AuthorDirectory::for_users(self.ctx, &users, false).await?;

        let users = users
            .into_iter()
            .map(|user| UserResponse {
                author: authors.get(user.id),
                created_at: user.created_at,
            })
            .collect();

        Ok(DataBody::new(UserListResponse {
            users,
            pagination: PaginationMeta::from(PageInfo::new(page, total)),
        }))
    }
}
