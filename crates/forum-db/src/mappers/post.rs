//! Post entity <-> model mapper

use forum_core::entities::Post;
use uuid::Uuid;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            topic_id: model.topic_id,
            author_id: model.author_id,
            content: model.content,
            is_edited: model.is_edited,
            edited_at: model.edited_at,
            likes: model.likes,
            dislikes: model.dislikes,
            reports: model.reports,
            reactions_count: model.reactions_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values for inserting a post; counters always start at zero
pub struct PostInsert<'a> {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub author_id: i64,
    pub content: &'a str,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id,
            topic_id: post.topic_id,
            author_id: post.author_id,
            content: &post.content,
        }
    }
}
