//! User model -> entity

use forum_core::entities::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            minecraft_username: model.minecraft_username,
            avatar: model.avatar,
            role_id: model.role_id,
            created_at: model.created_at,
        }
    }
}
