//! Reaction entities - votes and named emoji reactions on posts

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// A like or dislike on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::ValidationError(format!("unknown vote: {other}"))),
        }
    }
}

/// Transition of the exclusive vote slot held by one user on one post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSlot {
    /// Vote held after the toggle, if any
    pub next: Option<Vote>,
    pub like_delta: i32,
    pub dislike_delta: i32,
}

impl VoteSlot {
    /// Apply a like/dislike request to the currently held vote.
    ///
    /// Same vote again clears the slot, the opposite vote replaces it.
    pub fn apply(current: Option<Vote>, requested: Vote) -> Self {
        let next = if current == Some(requested) {
            None
        } else {
            Some(requested)
        };

        let weight = |slot: Option<Vote>, vote: Vote| i32::from(slot == Some(vote));
        Self {
            next,
            like_delta: weight(next, Vote::Like) - weight(current, Vote::Like),
            dislike_delta: weight(next, Vote::Dislike) - weight(current, Vote::Dislike),
        }
    }

    /// Whether the requested vote is held after the toggle
    #[inline]
    pub fn is_active(&self, requested: Vote) -> bool {
        self.next == Some(requested)
    }
}

/// What a reaction row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    /// Occupies the single like/dislike slot
    Vote(Vote),
    /// One of many coexisting catalog reactions
    Named(i32),
}

impl ReactionKind {
    /// Exclusive kinds replace each other; named kinds coexist
    #[inline]
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Vote(_))
    }

    #[inline]
    pub fn vote(self) -> Option<Vote> {
        match self {
            Self::Vote(vote) => Some(vote),
            Self::Named(_) => None,
        }
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: Uuid,
    pub user_id: i64,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(post_id: Uuid, user_id: i64, kind: ReactionKind) -> Self {
        Self {
            post_id,
            user_id,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Two reactions compete for the same slot.
    ///
    /// Exclusive kinds share one slot per user and post; any other kind
    /// only conflicts with itself.
    pub fn conflicts_with(&self, other: &Reaction) -> bool {
        if self.post_id != other.post_id || self.user_id != other.user_id {
            return false;
        }
        (self.kind.is_exclusive() && other.kind.is_exclusive()) || self.kind == other.kind
    }
}

/// Catalog entry for named reactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionType {
    pub id: i32,
    pub emoji: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of a like/dislike toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// Whether the requested vote is held after the call
    pub active: bool,
    pub likes: i32,
    pub dislikes: i32,
}

/// Result of a named reaction toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionToggle {
    pub reaction_type: ReactionType,
    pub reacted: bool,
    pub reactions_count: i32,
}

/// Result of toggling a reaction of either kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Vote(VoteOutcome),
    Named(ReactionToggle),
}

impl ToggleOutcome {
    pub fn into_vote(self) -> Option<VoteOutcome> {
        match self {
            Self::Vote(outcome) => Some(outcome),
            Self::Named(_) => None,
        }
    }

    pub fn into_named(self) -> Option<ReactionToggle> {
        match self {
            Self::Named(toggle) => Some(toggle),
            Self::Vote(_) => None,
        }
    }
}

/// Aggregated count of one reaction type on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSummary {
    pub reaction_type_id: i32,
    pub emoji: String,
    pub name: String,
    pub count: i64,
    pub user_reacted: bool,
}

impl ReactionSummary {
    /// Display order: most used first, catalog order on ties
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        b.count
            .cmp(&a.count)
            .then(a.reaction_type_id.cmp(&b.reaction_type_id))
    }

    /// Entries nobody used are hidden unless the viewer holds them
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.count > 0 || self.user_reacted
    }
}
