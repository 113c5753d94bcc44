//! Post service

use forum_core::entities::Post;
use forum_core::{DomainError, Permissions};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{CreatePostRequest, PostCreated, PostResponse};

use super::authors::AuthorDirectory;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reply to a topic (requires `create_posts`; the topic must not be locked)
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: i64,
        topic_id: Uuid,
        request: CreatePostRequest,
    ) -> ServiceResult<PostCreated> {
        PermissionService::new(self.ctx)
            .require_permission(author_id, Permissions::CREATE_POSTS)
            .await?;

        let post = Post::new(topic_id, author_id, &request.content)?;

        match self.ctx.post_repo().create(&post).await {
            Ok(()) => {}
            Err(DomainError::TopicLocked(id)) => {
                warn!(topic_id = %id, author_id, "Reply rejected, topic is locked");
                return Err(DomainError::TopicLocked(id).into());
            }
            Err(DomainError::TopicNotFound(id)) => {
                return Err(ServiceError::not_found("Topic", id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        info!(post_id = %post.id, topic_id = %topic_id, author_id, "Reply created");

        let authors = AuthorDirectory::load(self.ctx, [author_id], true).await?;
        Ok(PostCreated {
            message: "Reply created successfully".to_string(),
            post: PostResponse::from_post(post, authors.get(author_id)),
        })
    }
}
