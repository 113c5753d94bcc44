//! Topic entity - a discussion thread inside a category

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Whether a topic accepts replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    Open,
    Locked,
}

/// Topic entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: Uuid,
    pub category_id: Uuid,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub views: i32,
    pub replies: i32,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    pub const TITLE_MIN_LEN: usize = 5;
    pub const TITLE_MAX_LEN: usize = 255;
    pub const CONTENT_MIN_LEN: usize = 10;
    pub const TAG_MAX_LEN: usize = 50;

    /// Create a new open topic, validating and normalizing the input.
    ///
    /// Title and content are trimmed before length checks; tags are trimmed,
    /// lower-cased and de-duplicated.
    pub fn new(
        category_id: Uuid,
        author_id: i64,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        let content = content.trim();
        Self::validate_title(title)?;
        Self::validate_content(content)?;
        let tags = Self::normalize_tags(tags)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            category_id,
            author_id,
            title: title.to_string(),
            content: content.to_string(),
            is_pinned: false,
            is_locked: false,
            views: 0,
            replies: 0,
            tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Title length after trimming must be within 5..=255 characters
    pub fn validate_title(title: &str) -> Result<(), DomainError> {
        let len = title.trim().chars().count();
        if (Self::TITLE_MIN_LEN..=Self::TITLE_MAX_LEN).contains(&len) {
            Ok(())
        } else {
            Err(DomainError::InvalidTitleLength {
                min: Self::TITLE_MIN_LEN,
                max: Self::TITLE_MAX_LEN,
            })
        }
    }

    /// Content length after trimming must be at least 10 characters
    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().chars().count() >= Self::CONTENT_MIN_LEN {
            Ok(())
        } else {
            Err(DomainError::ContentTooShort {
                min: Self::CONTENT_MIN_LEN,
            })
        }
    }

    /// Trim, lower-case and de-duplicate tags, dropping blanks
    pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, DomainError> {
        let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim().to_lowercase();
            if tag.is_empty() {
                continue;
            }
            if tag.chars().count() > Self::TAG_MAX_LEN {
                return Err(DomainError::InvalidTopicTag(tag));
            }
            if !normalized.contains(&tag) {
                normalized.push(tag);
            }
        }
        Ok(normalized)
    }

    #[inline]
    pub fn status(&self) -> TopicStatus {
        if self.is_locked {
            TopicStatus::Locked
        } else {
            TopicStatus::Open
        }
    }

    /// Locked topics stay readable but reject new posts
    #[inline]
    pub fn accepts_posts(&self) -> bool {
        self.status() == TopicStatus::Open
    }
}
