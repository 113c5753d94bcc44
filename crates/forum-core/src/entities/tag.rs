//! Tag entities - cosmetic badges assigned to users

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::entities::AssignmentState;
use crate::error::DomainError;

/// Tag grouping, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagCategory {
    Staff,
    Special,
    Achievement,
    Custom,
}

impl TagCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Special => "special",
            Self::Achievement => "achievement",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Self::Staff),
            "special" => Ok(Self::Special),
            "achievement" => Ok(Self::Achievement),
            "custom" => Ok(Self::Custom),
            other => Err(DomainError::ValidationError(format!(
                "unknown tag category: {other}"
            ))),
        }
    }
}

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: Option<String>,
    pub category: TagCategory,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub const DEFAULT_COLOR: &'static str = "#3B82F6";
}

/// Input for creating a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: Option<String>,
    pub category: TagCategory,
}

/// A tag granted to a user.
///
/// Rows are never deleted: removal moves the assignment to `Revoked`, and a
/// later assignment of the same tag reactivates the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssignment {
    pub user_id: i64,
    pub tag_id: i32,
    pub assigned_by: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub state: AssignmentState,
}

impl TagAssignment {
    pub fn new(
        user_id: i64,
        tag_id: i32,
        assigned_by: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            tag_id,
            assigned_by,
            assigned_at: Utc::now(),
            expires_at,
            state: AssignmentState::Active,
        }
    }

    /// Reactivate (or refresh) the assignment
    pub fn reassign(&mut self, assigned_by: Option<i64>, expires_at: Option<DateTime<Utc>>) {
        self.assigned_by = assigned_by;
        self.assigned_at = Utc::now();
        self.expires_at = expires_at;
        self.state = AssignmentState::Active;
    }

    /// Soft-disable. Returns false if it was already revoked.
    pub fn revoke(&mut self) -> bool {
        let changed = self.state == AssignmentState::Active;
        self.state = AssignmentState::Revoked;
        changed
    }

    /// Active and not yet expired
    pub fn is_effective(&self, now: DateTime<Utc>) -> bool {
        self.state == AssignmentState::Active && self.expires_at.map_or(true, |at| at > now)
    }
}

/// An effective tag on a user, with assignment metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTag {
    pub user_id: i64,
    pub tag: Tag,
    pub assigned_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
