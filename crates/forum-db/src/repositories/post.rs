//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{Post, Topic};
use forum_core::error::DomainError;
use forum_core::traits::{PostRepository, RepoResult};
use forum_core::value_objects::PageRequest;

use crate::mappers::PostInsert;
use crate::models::{PostModel, TopicModel};

use super::error::map_db_error;

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, topic_id, author_id, content, is_edited, edited_at, likes, dislikes,
                   reports, reactions_count, created_at, updated_at
            FROM forum_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_by_topic(&self, topic_id: Uuid, page: PageRequest) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, topic_id, author_id, content, is_edited, edited_at, likes, dislikes,
                   reports, reactions_count, created_at, updated_at
            FROM forum_posts
            WHERE topic_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(topic_id)
        .bind(page.limit_i64())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_topic(&self, topic_id: Uuid) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM forum_posts WHERE topic_id = $1
            "#,
        )
        .bind(topic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, topic_id = %post.topic_id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let insert = PostInsert::new(post);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The lock flag is read under the row lock, so a concurrent lock
        // either lands before this check or waits for the commit
        let topic = sqlx::query_as::<_, TopicModel>(
            r#"
            SELECT id, category_id, author_id, title, content, is_pinned, is_locked,
                   views, replies, '{}'::text[] AS tags, created_at, updated_at
            FROM forum_topics
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(insert.topic_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(Topic::from)
        .ok_or(DomainError::TopicNotFound(insert.topic_id))?;

        if !topic.accepts_posts() {
            return Err(DomainError::TopicLocked(topic.id));
        }

        sqlx::query(
            r#"
            INSERT INTO forum_posts (id, topic_id, author_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(insert.id)
        .bind(insert.topic_id)
        .bind(insert.author_id)
        .bind(insert.content)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE forum_topics
            SET replies = replies + 1, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(insert.topic_id)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE forum_categories
            SET posts_count = posts_count + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(topic.category_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
