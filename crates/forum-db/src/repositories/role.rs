//! PostgreSQL implementation of RoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Role;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, RoleRepository};

use crate::models::RoleModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RoleRepository
#[derive(Clone)]
pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    /// Create a new PgRoleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let results = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, name, display_name, description, color, permissions, hierarchy_level,
                   created_at, updated_at
            FROM user_roles
            ORDER BY hierarchy_level DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, name, display_name, description, color, permissions, hierarchy_level,
                   created_at, updated_at
            FROM user_roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn find_default(&self) -> RepoResult<Option<Role>> {
        let result = sqlx::query_as::<_, RoleModel>(
            r#"
            SELECT id, name, display_name, description, color, permissions, hierarchy_level,
                   created_at, updated_at
            FROM user_roles
            ORDER BY hierarchy_level ASC, id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Role::from))
    }

    #[instrument(skip(self))]
    async fn assign(&self, user_id: i64, role_id: i32, assigned_by: Option<i64>) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let role_exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM user_roles WHERE id = $1)
            "#,
        )
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !role_exists {
            return Err(DomainError::RoleNotFound(role_id));
        }

        let updated = sqlx::query(
            r#"
            UPDATE users SET role_id = $2, updated_at = NOW() WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user_id));
        }

        // A user holds at most one active role assignment
        sqlx::query(
            r#"
            UPDATE user_role_assignments
            SET state = 'revoked'
            WHERE user_id = $1 AND role_id <> $2 AND state = 'active'
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO user_role_assignments (user_id, role_id, assigned_by, assigned_at, state)
            VALUES ($1, $2, $3, NOW(), 'active')
            ON CONFLICT (user_id, role_id)
            DO UPDATE SET assigned_by = EXCLUDED.assigned_by,
                          assigned_at = EXCLUDED.assigned_at,
                          state = 'active'
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .bind(assigned_by)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
