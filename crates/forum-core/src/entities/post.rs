//! Post entity - a reply inside a topic

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity
///
/// `likes`, `dislikes` and `reactions_count` are denormalized counters maintained
/// by the reaction repository in the same transaction as the reaction rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub author_id: i64,
    pub content: String,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub likes: i32,
    pub dislikes: i32,
    pub reports: i32,
    pub reactions_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub const CONTENT_MIN_LEN: usize = 5;

    /// Create a new post with trimmed content
    pub fn new(topic_id: Uuid, author_id: i64, content: &str) -> Result<Self, DomainError> {
        let content = content.trim();
        Self::validate_content(content)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            topic_id,
            author_id,
            content: content.to_string(),
            is_edited: false,
            edited_at: None,
            likes: 0,
            dislikes: 0,
            reports: 0,
            reactions_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().chars().count() >= Self::CONTENT_MIN_LEN {
            Ok(())
        } else {
            Err(DomainError::ContentTooShort {
                min: Self::CONTENT_MIN_LEN,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_trimmed() {
        let post = Post::new(Uuid::new_v4(), 7, "  Nice to meet you all  ").unwrap();
        assert_eq!(post.content, "Nice to meet you all");
        assert_eq!(post.author_id, 7);
        assert!(!post.is_edited);
    }

    #[test]
    fn test_content_minimum() {
        assert!(Post::new(Uuid::new_v4(), 1, "abcd").is_err());
        assert!(Post::new(Uuid::new_v4(), 1, "  abcd  ").is_err());
        assert!(Post::new(Uuid::new_v4(), 1, "abcde").is_ok());
    }

    #[test]
    fn test_counters_start_at_zero() {
        let post = Post::new(Uuid::new_v4(), 1, "hello there").unwrap();
        assert_eq!(post.likes, 0);
        assert_eq!(post.dislikes, 0);
        assert_eq!(post.reactions_count, 0);
    }
}
