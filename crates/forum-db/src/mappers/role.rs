//! Role model -> entity

use forum_core::entities::Role;
use forum_core::value_objects::Permissions;

use crate::models::RoleModel;

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: model.id,
            name: model.name,
            display_name: model.display_name,
            description: model.description,
            color: model.color,
            permissions: Permissions::from_i64(model.permissions),
            hierarchy_level: model.hierarchy_level,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
