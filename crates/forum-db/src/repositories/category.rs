//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{Category, Topic};
use forum_core::traits::{CategoryRepository, RepoResult};

use crate::mappers::CategoryInsert;
use crate::models::{CategoryModel, TopicModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CategoryRepository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Category>> {
        let result = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT id, name, description, color, icon, topics_count, posts_count,
                   created_at, updated_at
            FROM forum_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let results = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT id, name, description, color, icon, topics_count, posts_count,
                   created_at, updated_at
            FROM forum_categories
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: &Category) -> RepoResult<()> {
        let insert = CategoryInsert::new(category);

        sqlx::query(
            r#"
            INSERT INTO forum_categories (id, name, description, color, icon, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.name)
        .bind(insert.description)
        .bind(insert.color)
        .bind(insert.icon)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn latest_topics(&self) -> RepoResult<Vec<Topic>> {
        let results = sqlx::query_as::<_, TopicModel>(
            r#"
            SELECT DISTINCT ON (t.category_id)
                   t.id, t.category_id, t.author_id, t.title, t.content, t.is_pinned,
                   t.is_locked, t.views, t.replies,
                   COALESCE(
                       (SELECT ARRAY_AGG(tt.tag_name::text ORDER BY tt.tag_name)
                        FROM forum_topic_tags tt WHERE tt.topic_id = t.id),
                       '{}'::text[]
                   ) AS tags,
                   t.created_at, t.updated_at
            FROM forum_topics t
            ORDER BY t.category_id, t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Topic::from).collect())
    }
}
