//! Topic entity <-> model mapper

use forum_core::entities::Topic;
use uuid::Uuid;

use crate::models::TopicModel;

impl From<TopicModel> for Topic {
    fn from(model: TopicModel) -> Self {
        Topic {
            id: model.id,
            category_id: model.category_id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            is_pinned: model.is_pinned,
            is_locked: model.is_locked,
            views: model.views,
            replies: model.replies,
            tags: model.tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values for inserting a topic and its tag rows
pub struct TopicInsert<'a> {
    pub id: Uuid,
    pub category_id: Uuid,
    pub author_id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub tags: &'a [String],
}

impl<'a> TopicInsert<'a> {
    pub fn new(topic: &'a Topic) -> Self {
        Self {
            id: topic.id,
            category_id: topic.category_id,
            author_id: topic.author_id,
            title: &topic.title,
            content: &topic.content,
            is_pinned: topic.is_pinned,
            is_locked: topic.is_locked,
            tags: &topic.tags,
        }
    }
}
