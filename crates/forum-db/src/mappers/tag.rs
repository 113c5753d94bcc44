//! Tag models -> entities
//!
//! Category and state are stored as text, so these conversions can fail on
//! rows written outside the application.

use forum_core::entities::{Tag, TagAssignment, UserTag};
use forum_core::error::DomainError;

use crate::models::{TagAssignmentModel, TagModel, UserTagModel};

impl TryFrom<TagModel> for Tag {
    type Error = DomainError;

    fn try_from(model: TagModel) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: model.id,
            name: model.name,
            display_name: model.display_name,
            description: model.description,
            color: model.color,
            icon: model.icon,
            category: model
                .category
                .parse()
                .map_err(|_| DomainError::InternalError(format!("bad tag category: {}", model.category)))?,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<TagAssignmentModel> for TagAssignment {
    type Error = DomainError;

    fn try_from(model: TagAssignmentModel) -> Result<Self, Self::Error> {
        Ok(TagAssignment {
            user_id: model.user_id,
            tag_id: model.tag_id,
            assigned_by: model.assigned_by,
            assigned_at: model.assigned_at,
            expires_at: model.expires_at,
            state: model.state.parse()?,
        })
    }
}

impl TryFrom<UserTagModel> for UserTag {
    type Error = DomainError;

    fn try_from(model: UserTagModel) -> Result<Self, Self::Error> {
        Ok(UserTag {
            user_id: model.user_id,
            assigned_at: model.assigned_at,
            expires_at: model.expires_at,
            tag: Tag::try_from(model.tag)?,
        })
    }
}
