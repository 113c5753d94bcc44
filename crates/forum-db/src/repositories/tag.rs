//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{NewTag, Tag, TagAssignment, TagCategory, UserTag};
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, TagRepository};

use crate::models::{TagAssignmentModel, TagModel, UserTagModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_active(&self, category: Option<TagCategory>) -> RepoResult<Vec<Tag>> {
        let results = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT id, name, display_name, description, color, icon, category, is_active,
                   created_at, updated_at
            FROM user_tags
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR category = $1)
            ORDER BY CASE category
                         WHEN 'staff' THEN 0
                         WHEN 'special' THEN 1
                         WHEN 'achievement' THEN 2
                         ELSE 3
                     END,
                     display_name ASC
            "#,
        )
        .bind(category.map(TagCategory::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Tag::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT id, name, display_name, description, color, icon, category, is_active,
                   created_at, updated_at
            FROM user_tags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Tag::try_from).transpose()
    }

    #[instrument(skip(self, tag), fields(name = %tag.name))]
    async fn create(&self, tag: &NewTag) -> RepoResult<Tag> {
        let result = sqlx::query_as::<_, TagModel>(
            r#"
            INSERT INTO user_tags (name, display_name, description, color, icon, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, display_name, description, color, icon, category, is_active,
                      created_at, updated_at
            "#,
        )
        .bind(&tag.name)
        .bind(&tag.display_name)
        .bind(&tag.description)
        .bind(&tag.color)
        .bind(&tag.icon)
        .bind(tag.category.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TagNameTaken(tag.name.clone())))?;

        Tag::try_from(result)
    }

    #[instrument(skip(self))]
    async fn assign(
        &self,
        user_id: i64,
        tag_id: i32,
        assigned_by: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> RepoResult<TagAssignment> {
        let result = sqlx::query_as::<_, TagAssignmentModel>(
            r#"
            INSERT INTO user_tag_assignments (user_id, tag_id, assigned_by, assigned_at, expires_at, state)
            VALUES ($1, $2, $3, NOW(), $4, 'active')
            ON CONFLICT (user_id, tag_id)
            DO UPDATE SET assigned_by = EXCLUDED.assigned_by,
                          assigned_at = EXCLUDED.assigned_at,
                          expires_at = EXCLUDED.expires_at,
                          state = 'active'
            RETURNING user_id, tag_id, assigned_by, assigned_at, expires_at, state
            "#,
        )
        .bind(user_id)
        .bind(tag_id)
        .bind(assigned_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(user_id)))?;

        TagAssignment::try_from(result)
    }

    #[instrument(skip(self))]
    async fn revoke(&self, user_id: i64, tag_id: i32) -> RepoResult<Option<TagAssignment>> {
        let result = sqlx::query_as::<_, TagAssignmentModel>(
            r#"
            UPDATE user_tag_assignments
            SET state = 'revoked'
            WHERE user_id = $1 AND tag_id = $2
            RETURNING user_id, tag_id, assigned_by, assigned_at, expires_at, state
            "#,
        )
        .bind(user_id)
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TagAssignment::try_from).transpose()
    }

    #[instrument(skip(self, user_ids), fields(users = user_ids.len()))]
    async fn effective_for_users(
        &self,
        user_ids: &[i64],
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<UserTag>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserTagModel>(
            r#"
            SELECT a.user_id, a.assigned_at, a.expires_at,
                   t.id, t.name, t.display_name, t.description, t.color, t.icon, t.category,
                   t.is_active, t.created_at, t.updated_at
            FROM user_tag_assignments a
            JOIN user_tags t ON t.id = a.tag_id
            WHERE a.user_id = ANY($1)
              AND a.state = 'active'
              AND t.is_active = TRUE
              AND (a.expires_at IS NULL OR a.expires_at > $2)
            ORDER BY a.user_id,
                     CASE t.category
                         WHEN 'staff' THEN 0
                         WHEN 'special' THEN 1
                         WHEN 'achievement' THEN 2
                         ELSE 3
                     END,
                     t.display_name ASC
            "#,
        )
        .bind(user_ids)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(UserTag::try_from).collect()
    }
}
