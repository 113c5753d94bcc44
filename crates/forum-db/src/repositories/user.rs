//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{NewUser, User};
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, UserFilter, UserRepository};
use forum_core::value_objects::PageRequest;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, minecraft_username, avatar, role_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[i64]) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, minecraft_username, avatar, role_id, created_at
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (username, minecraft_username, avatar, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, minecraft_username, avatar, role_id, created_at
            "#,
        )
        .bind(&user.username)
        .bind(user.minecraft_username.as_deref())
        .bind(user.avatar.as_deref())
        .bind(user.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("username already exists: {}", user.username))
            })
        })?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Vec<User>> {
        // Users without a role rank as the lowest-hierarchy role
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT u.id, u.username, u.minecraft_username, u.avatar, u.role_id, u.created_at
            FROM users u
            LEFT JOIN user_roles r ON r.id = COALESCE(
                u.role_id,
                (SELECT id FROM user_roles ORDER BY hierarchy_level ASC, id ASC LIMIT 1)
            )
            WHERE ($1::text IS NULL OR r.name = $1)
              AND ($2::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM user_tag_assignments a
                    JOIN user_tags t ON t.id = a.tag_id
                    WHERE a.user_id = u.id
                      AND t.name = $2
                      AND t.is_active
                      AND a.state = 'active'
                      AND (a.expires_at IS NULL OR a.expires_at > NOW())
              ))
            ORDER BY r.hierarchy_level DESC NULLS LAST, u.username ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.role.as_deref())
        .bind(filter.tag.as_deref())
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users u
            LEFT JOIN user_roles r ON r.id = COALESCE(
                u.role_id,
                (SELECT id FROM user_roles ORDER BY hierarchy_level ASC, id ASC LIMIT 1)
            )
            WHERE ($1::text IS NULL OR r.name = $1)
              AND ($2::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM user_tag_assignments a
                    JOIN user_tags t ON t.id = a.tag_id
                    WHERE a.user_id = u.id
                      AND t.name = $2
                      AND t.is_active
                      AND a.state = 'active'
                      AND (a.expires_at IS NULL OR a.expires_at > NOW())
              ))
            "#,
        )
        .bind(filter.role.as_deref())
        .bind(filter.tag.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
