//! Capability flags granted to forum roles
//!
//! Stored as a BIGINT bitfield in the database and exchanged in JSON as a list of
//! snake_case capability names (`["view_forum", "create_posts"]`).

use bitflags::bitflags;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Forum capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Read categories, topics and posts
        const VIEW_FORUM       = 1 << 0;
        /// Open new topics
        const CREATE_TOPICS    = 1 << 1;
        /// Reply to topics
        const CREATE_POSTS     = 1 << 2;
        /// Vote and react on posts
        const REACT_POSTS      = 1 << 3;
        /// Lock, unlock, pin and unpin topics
        const MANAGE_TOPICS    = 1 << 4;
        const MODERATE_FORUM   = 1 << 5;
        const DELETE_POSTS     = 1 << 6;
        const WARN_USERS       = 1 << 7;
        const MUTE_USERS       = 1 << 8;
        const BAN_USERS        = 1 << 9;
        const VIEW_REPORTS     = 1 << 10;
        const MANAGE_CONTENT   = 1 << 11;
        /// Create categories
        const MANAGE_FORUM     = 1 << 12;
        /// Create, assign and revoke user tags
        const MANAGE_TAGS      = 1 << 13;
        /// Assign roles to users
        const MANAGE_ROLES     = 1 << 14;
        const MANAGE_USERS     = 1 << 15;
        const VIEW_ADMIN_PANEL = 1 << 16;

        /// Default role granted to every registered player
        const PLAYER = Self::VIEW_FORUM.bits()
            | Self::CREATE_TOPICS.bits()
            | Self::CREATE_POSTS.bits()
            | Self::REACT_POSTS.bits();

        const MODERATOR = Self::PLAYER.bits()
            | Self::MANAGE_TOPICS.bits()
            | Self::MODERATE_FORUM.bits()
            | Self::DELETE_POSTS.bits()
            | Self::WARN_USERS.bits()
            | Self::MUTE_USERS.bits()
            | Self::VIEW_REPORTS.bits();

        const ADMIN = Self::MODERATOR.bits()
            | Self::BAN_USERS.bits()
            | Self::MANAGE_CONTENT.bits()
            | Self::MANAGE_FORUM.bits()
            | Self::MANAGE_TAGS.bits()
            | Self::MANAGE_ROLES.bits()
            | Self::MANAGE_USERS.bits()
            | Self::VIEW_ADMIN_PANEL.bits();
    }
}

/// Wire names, in bit order
const NAMES: [(&str, Permissions); 17] = [
    ("view_forum", Permissions::VIEW_FORUM),
    ("create_topics", Permissions::CREATE_TOPICS),
    ("create_posts", Permissions::CREATE_POSTS),
    ("react_posts", Permissions::REACT_POSTS),
    ("manage_topics", Permissions::MANAGE_TOPICS),
    ("moderate_forum", Permissions::MODERATE_FORUM),
    ("delete_posts", Permissions::DELETE_POSTS),
    ("warn_users", Permissions::WARN_USERS),
    ("mute_users", Permissions::MUTE_USERS),
    ("ban_users", Permissions::BAN_USERS),
    ("view_reports", Permissions::VIEW_REPORTS),
    ("manage_content", Permissions::MANAGE_CONTENT),
    ("manage_forum", Permissions::MANAGE_FORUM),
    ("manage_tags", Permissions::MANAGE_TAGS),
    ("manage_roles", Permissions::MANAGE_ROLES),
    ("manage_users", Permissions::MANAGE_USERS),
    ("view_admin_panel", Permissions::VIEW_ADMIN_PANEL),
];

impl Permissions {
    /// Check if the permission set contains every required capability
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(permission)
    }

    /// Check if the permission set has any of the given capabilities
    #[inline]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        self.intersects(permissions)
    }

    /// Get the raw bits as i64 (for database storage)
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.bits() as i64
    }

    /// Create from raw i64 bits (from database)
    #[inline]
    pub fn from_i64(bits: i64) -> Self {
        Permissions::from_bits_truncate(bits as u64)
    }

    /// Look up a single capability by its wire name
    pub fn from_wire_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, flag)| *flag)
    }

    /// Build a set from wire names, failing on the first unknown name
    pub fn from_names<'a, I>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().try_fold(Permissions::empty(), |acc, name| {
            Self::from_wire_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| format!("unknown permission: {name}"))
        })
    }

    /// Wire names of every capability that is set, in bit order
    pub fn list(&self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.list().join(", "))
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.list();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

// Deserialize from a list of names or from raw bits
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};

        struct PermissionsVisitor;

        impl<'de> Visitor<'de> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a list of permission names or an integer bitfield")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_i64(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_bits_truncate(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Permissions, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut perms = Permissions::empty();
                while let Some(name) = seq.next_element::<String>()? {
                    let flag = Permissions::from_wire_name(&name).ok_or_else(|| {
                        de::Error::custom(format!("unknown permission: {name}"))
                    })?;
                    perms |= flag;
                }
                Ok(perms)
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<i64> for Permissions {
    fn from(bits: i64) -> Self {
        Permissions::from_i64(bits)
    }
}

impl From<Permissions> for i64 {
    fn from(perms: Permissions) -> Self {
        perms.to_i64()
    }
}
