//! Role entity - a named capability set with a hierarchy level

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Permissions;

/// Role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub color: String,
    pub permissions: Permissions,
    pub hierarchy_level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Name of the lowest-privilege seeded role
    pub const PLAYER: &'static str = "player";

    #[inline]
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.permissions.has(permission)
    }

    /// Check if this role outranks another
    #[inline]
    pub fn is_higher_than(&self, other: &Role) -> bool {
        self.hierarchy_level > other.hierarchy_level
    }
}

/// Lifecycle of a role or tag assignment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentState {
    Active,
    Revoked,
}

impl AssignmentState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for AssignmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "revoked" => Ok(Self::Revoked),
            other => Err(DomainError::InternalError(format!(
                "unknown assignment state: {other}"
            ))),
        }
    }
}

/// Audit row recording who granted a role and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub user_id: i64,
    pub role_id: i32,
    pub assigned_by: Option<i64>,
    pub assigned_at: DateTime<Utc>,
    pub state: AssignmentState,
}
