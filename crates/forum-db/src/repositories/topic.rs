//! PostgreSQL implementation of TopicRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::Topic;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, TopicFilter, TopicRepository};
use forum_core::value_objects::PageRequest;

use crate::mappers::TopicInsert;
use crate::models::TopicModel;

use super::error::map_db_error;
use super::query::contains_pattern;

/// PostgreSQL implementation of TopicRepository
#[derive(Clone)]
pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    /// Create a new PgTopicRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Topic>> {
        let result = sqlx::query_as::<_, TopicModel>(
            r#"
            SELECT t.id, t.category_id, t.author_id, t.title, t.content, t.is_pinned,
                   t.is_locked, t.views, t.replies,
                   COALESCE(
                       (SELECT ARRAY_AGG(tt.tag_name::text ORDER BY tt.tag_name)
                        FROM forum_topic_tags tt WHERE tt.topic_id = t.id),
                       '{}'::text[]
                   ) AS tags,
                   t.created_at, t.updated_at
            FROM forum_topics t
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Topic::from))
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Topic>> {
        // Increment and read in one statement; the returned count includes this view
        let result = sqlx::query_as::<_, TopicModel>(
            r#"
            WITH viewed AS (
                UPDATE forum_topics
                SET views = views + 1
                WHERE id = $1
                RETURNING *
            )
            SELECT v.id, v.category_id, v.author_id, v.title, v.content, v.is_pinned,
                   v.is_locked, v.views, v.replies,
                   COALESCE(
                       (SELECT ARRAY_AGG(tt.tag_name::text ORDER BY tt.tag_name)
                        FROM forum_topic_tags tt WHERE tt.topic_id = v.id),
                       '{}'::text[]
                   ) AS tags,
                   v.created_at, v.updated_at
            FROM viewed v
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Topic::from))
    }

    #[instrument(skip(self))]
    async fn find_page(&self, filter: &TopicFilter, page: PageRequest) -> RepoResult<Vec<Topic>> {
        let pattern = filter.search.as_deref().map(contains_pattern);

        let results = sqlx::query_as::<_, TopicModel>(
            r#"
            SELECT t.id, t.category_id, t.author_id, t.title, t.content, t.is_pinned,
                   t.is_locked, t.views, t.replies,
                   COALESCE(
                       (SELECT ARRAY_AGG(tt.tag_name::text ORDER BY tt.tag_name)
                        FROM forum_topic_tags tt WHERE tt.topic_id = t.id),
                       '{}'::text[]
                   ) AS tags,
                   t.created_at, t.updated_at
            FROM forum_topics t
            WHERE ($1::uuid IS NULL OR t.category_id = $1)
              AND ($2::text IS NULL OR t.title ILIKE $2 OR t.content ILIKE $2)
            ORDER BY t.is_pinned DESC, t.updated_at DESC, t.id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.category_id)
        .bind(pattern)
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Topic::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &TopicFilter) -> RepoResult<i64> {
        let pattern = filter.search.as_deref().map(contains_pattern);

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM forum_topics t
            WHERE ($1::uuid IS NULL OR t.category_id = $1)
              AND ($2::text IS NULL OR t.title ILIKE $2 OR t.content ILIKE $2)
            "#,
        )
        .bind(filter.category_id)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, topic), fields(topic_id = %topic.id, category_id = %topic.category_id))]
    async fn create(&self, topic: &Topic) -> RepoResult<()> {
        let insert = TopicInsert::new(topic);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the category row so its counter moves with the insert
        let category = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM forum_categories WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(insert.category_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if category.is_none() {
            return Err(DomainError::CategoryNotFound(insert.category_id));
        }

        sqlx::query(
            r#"
            INSERT INTO forum_topics (id, category_id, author_id, title, content, is_pinned,
                                      is_locked, views, replies, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 0, $8, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.category_id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(insert.is_pinned)
        .bind(insert.is_locked)
        .bind(topic.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if !insert.tags.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO forum_topic_tags (topic_id, tag_name)
                SELECT $1, UNNEST($2::text[])
                ON CONFLICT (topic_id, tag_name) DO NOTHING
                "#,
            )
            .bind(insert.id)
            .bind(insert.tags)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query(
            r#"
            UPDATE forum_categories
            SET topics_count = topics_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(insert.category_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_flags(
        &self,
        id: Uuid,
        locked: Option<bool>,
        pinned: Option<bool>,
    ) -> RepoResult<Topic> {
        let result = sqlx::query_as::<_, TopicModel>(
            r#"
            WITH updated AS (
                UPDATE forum_topics
                SET is_locked = COALESCE($2, is_locked),
                    is_pinned = COALESCE($3, is_pinned)
                WHERE id = $1
                RETURNING *
            )
            SELECT u.id, u.category_id, u.author_id, u.title, u.content, u.is_pinned,
                   u.is_locked, u.views, u.replies,
                   COALESCE(
                       (SELECT ARRAY_AGG(tt.tag_name::text ORDER BY tt.tag_name)
                        FROM forum_topic_tags tt WHERE tt.topic_id = u.id),
                       '{}'::text[]
                   ) AS tags,
                   u.created_at, u.updated_at
            FROM updated u
            "#,
        )
        .bind(id)
        .bind(locked)
        .bind(pinned)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(Topic::from)
            .ok_or(DomainError::TopicNotFound(id))
    }
}
