//! Category service
//!
//! Category listing with each category's newest topic, and category creation.

use std::collections::HashMap;

use forum_core::entities::{Category, Topic};
use forum_core::Permissions;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CategoriesBody, CategoryCreated, CategoryResponse, CreateCategoryRequest, LastPostResponse,
};

use super::authors::AuthorDirectory;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Category service
pub struct CategoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryService<'a> {
    /// Create a new CategoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All categories by name, each with its newest topic
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<CategoriesBody> {
        let categories = self.ctx.category_repo().find_all().await?;
        let latest = self.ctx.category_repo().latest_topics().await?;

        let authors =
            AuthorDirectory::load(self.ctx, latest.iter().map(|t| t.author_id), false).await?;
        let mut latest_by_category: HashMap<Uuid, Topic> =
            latest.into_iter().map(|t| (t.category_id, t)).collect();

        let categories = categories
            .into_iter()
            .map(|category| {
                let last_post = latest_by_category
                    .remove(&category.id)
                    .map(|topic| LastPostResponse {
                        topic_id: topic.id,
                        topic_title: topic.title,
                        created_at: topic.created_at,
                        user: authors.get(topic.author_id),
                    });
                category_response(category, last_post)
            })
            .collect();

        Ok(CategoriesBody { categories })
    }

    /// Create a category (requires `manage_forum`)
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        actor_id: i64,
        request: CreateCategoryRequest,
    ) -> ServiceResult<CategoryCreated> {
        PermissionService::new(self.ctx)
            .require_permission(actor_id, Permissions::MANAGE_FORUM)
            .await?;

        let category = Category::new(
            &request.name,
            request.description,
            request.color,
            request.icon,
        )?;
        self.ctx.category_repo().create(&category).await?;

        info!(category_id = %category.id, actor_id, "Category created");

        Ok(CategoryCreated {
            message: "Category created successfully".to_string(),
            category: category_response(category, None),
        })
    }
}

fn category_response(category: Category, last_post: Option<LastPostResponse>) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        description: category.description,
        color: category.color,
        icon: category.icon,
        topics_count: category.topics_count,
        posts_count: category.posts_count,
        created_at: category.created_at,
        updated_at: category.updated_at,
        last_post,
    }
}
