//! Topic service
//!
//! Topic listing and search, topic detail (which counts a view), creation,
//! and lock/pin moderation.

use std::collections::HashMap;

use forum_core::entities::{Category, Topic};
use forum_core::traits::TopicFilter;
use forum_core::value_objects::{PageInfo, PageRequest};
use forum_core::Permissions;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CategorySummary, CreateTopicRequest, PaginationMeta, PostResponse, TopicBody, TopicDetail,
    TopicListQuery, TopicPage, TopicResponse, UpdateTopicRequest,
};

use super::authors::AuthorDirectory;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Topic service
pub struct TopicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TopicService<'a> {
    /// Create a new TopicService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List topics, pinned first, then most recently active
    #[instrument(skip(self))]
    pub async fn list(&self, query: &TopicListQuery, page: PageRequest) -> ServiceResult<TopicPage> {
        let filter = TopicFilter {
            category_id: parse_category_filter(query.category_id.as_deref())?,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };

        let topics = self.ctx.topic_repo().find_page(&filter, page).await?;
        let total = self.ctx.topic_repo().count(&filter).await?;

        let categories: HashMap<Uuid, Category> = self
            .ctx
            .category_repo()
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let authors =
            AuthorDirectory::load(self.ctx, topics.iter().map(|t| t.author_id), false).await?;

        let topics = topics
            .into_iter()
            .map(|topic| {
                let category = categories.get(&topic.category_id);
                topic_response(topic, category, &authors)
            })
            .collect();

        Ok(TopicPage {
            topics,
            pagination: PaginationMeta::from(PageInfo::new(page, total)),
        })
    }

    /// Topic detail with a page of posts. Counts one view.
    #[instrument(skip(self))]
    pub async fn get(&self, topic_id: Uuid, page: PageRequest) -> ServiceResult<TopicDetail> {
        let topic = self
            .ctx
            .topic_repo()
            .record_view(topic_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Topic", topic_id.to_string()))?;

        let posts = self.ctx.post_repo().find_by_topic(topic_id, page).await?;
        let total = self.ctx.post_repo().count_by_topic(topic_id).await?;
        let category = self.ctx.category_repo().find_by_id(topic.category_id).await?;

        let author_ids = std::iter::once(topic.author_id).chain(posts.iter().map(|p| p.author_id));
        let authors = AuthorDirectory::load(self.ctx, author_ids, true).await?;

        let posts = posts
            .into_iter()
            .map(|post| {
                let author = authors.get(post.author_id);
                PostResponse::from_post(post, author)
            })
            .collect();

        Ok(TopicDetail {
            topic: topic_response(topic, category.as_ref(), &authors),
            posts,
            pagination: PaginationMeta::from(PageInfo::new(page, total)),
        })
    }

    /// Open a new topic (requires `create_topics`)
    #[instrument(skip(self, request), fields(category_id = %request.category_id))]
    pub async fn create(&self, author_id: i64, request: CreateTopicRequest) -> ServiceResult<TopicBody> {
        PermissionService::new(self.ctx)
            .require_permission(author_id, Permissions::CREATE_TOPICS)
            .await?;

        let topic = Topic::new(
            request.category_id,
            author_id,
            &request.title,
            &request.content,
            &request.tags,
        )?;

        let category = self
            .ctx
            .category_repo()
            .find_by_id(topic.category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", topic.category_id.to_string()))?;

        self.ctx.topic_repo().create(&topic).await?;

        info!(topic_id = %topic.id, author_id, tags = topic.tags.len(), "Topic created");

        let authors = AuthorDirectory::load(self.ctx, [author_id], false).await?;
        Ok(TopicBody {
            message: "Topic created successfully".to_string(),
            topic: topic_response(topic, Some(&category), &authors),
        })
    }

    /// Lock/unlock or pin/unpin a topic (requires `manage_topics`)
    #[instrument(skip(self))]
    pub async fn update_flags(
        &self,
        actor_id: i64,
        topic_id: Uuid,
        request: UpdateTopicRequest,
    ) -> ServiceResult<TopicBody> {
        PermissionService::new(self.ctx)
            .require_permission(actor_id, Permissions::MANAGE_TOPICS)
            .await?;

        if request.is_empty() {
            return Err(ServiceError::validation(
                "At least one of isLocked or isPinned is required",
            ));
        }

        let topic = self
            .ctx
            .topic_repo()
            .set_flags(topic_id, request.is_locked, request.is_pinned)
            .await?;

        info!(
            topic_id = %topic.id,
            actor_id,
            is_locked = topic.is_locked,
            is_pinned = topic.is_pinned,
            "Topic flags updated"
        );

        let category = self.ctx.category_repo().find_by_id(topic.category_id).await?;
        let authors = AuthorDirectory::load(self.ctx, [topic.author_id], false).await?;
        Ok(TopicBody {
            message: "Topic updated successfully".to_string(),
            topic: topic_response(topic, category.as_ref(), &authors),
        })
    }
}

/// `None`, empty and `all` mean no filter
fn parse_category_filter(raw: Option<&str>) -> ServiceResult<Option<Uuid>> {
    match raw.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| ServiceError::validation(format!("Invalid categoryId: {value}"))),
    }
}

fn topic_response(topic: Topic, category: Option<&Category>, authors: &AuthorDirectory) -> TopicResponse {
    TopicResponse {
        id: topic.id,
        category_id: topic.category_id,
        category: category.map(CategorySummary::from),
        user_id: topic.author_id,
        user: authors.get(topic.author_id),
        title: topic.title,
        content: topic.content,
        is_pinned: topic.is_pinned,
        is_locked: topic.is_locked,
        views: topic.views,
        replies: topic.replies,
        created_at: topic.created_at,
        updated_at: topic.updated_at,
        tags: topic.tags,
    }
}
