//! Reaction models -> entities

use forum_core::entities::{ReactionSummary, ReactionType};

use crate::models::{ReactionSummaryModel, ReactionTypeModel};

impl From<ReactionTypeModel> for ReactionType {
    fn from(model: ReactionTypeModel) -> Self {
        ReactionType {
            id: model.id,
            emoji: model.emoji,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

impl From<ReactionSummaryModel> for ReactionSummary {
    fn from(model: ReactionSummaryModel) -> Self {
        ReactionSummary {
            reaction_type_id: model.reaction_type_id,
            emoji: model.emoji,
            name: model.name,
            count: model.count,
            user_reacted: model.user_reacted,
        }
    }
}
