//! Category entity <-> model mapper

use forum_core::entities::Category;
use uuid::Uuid;

use crate::models::CategoryModel;

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            description: model.description,
            color: model.color,
            icon: model.icon,
            topics_count: model.topics_count,
            posts_count: model.posts_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Values for inserting a category
pub struct CategoryInsert<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub color: &'a str,
    pub icon: &'a str,
}

impl<'a> CategoryInsert<'a> {
    pub fn new(category: &'a Category) -> Self {
        Self {
            id: category.id,
            name: &category.name,
            description: category.description.as_deref(),
            color: &category.color,
            icon: &category.icon,
        }
    }
}
