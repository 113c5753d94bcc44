//! Reaction service
//!
//! Like/dislike share one exclusive slot per user and post; named reactions
//! are independent of each other and of the slot. Each toggle is applied by
//! the repository in a single transaction so counters never drift from the
//! reaction rows.

use forum_core::entities::{Reaction, ReactionKind, ToggleOutcome, Vote};
use forum_core::{DomainError, Permissions};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    DislikeToggled, LikeToggled, ReactRequest, ReactToggled, ReactionSummaryResponse,
    ReactionTypeBrief, ReactionTypeResponse, ReactionTypesBody, ReactionsBody,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a like
    #[instrument(skip(self))]
    pub async fn like(&self, post_id: Uuid, user_id: i64) -> ServiceResult<LikeToggled> {
        let outcome = self.vote(post_id, user_id, Vote::Like).await?;
        Ok(LikeToggled {
            message: if outcome.active { "Like added" } else { "Like removed" }.to_string(),
            liked: outcome.active,
            likes: outcome.likes,
            dislikes: outcome.dislikes,
        })
    }

    /// Toggle a dislike
    #[instrument(skip(self))]
    pub async fn dislike(&self, post_id: Uuid, user_id: i64) -> ServiceResult<DislikeToggled> {
        let outcome = self.vote(post_id, user_id, Vote::Dislike).await?;
        Ok(DislikeToggled {
            message: if outcome.active { "Dislike added" } else { "Dislike removed" }.to_string(),
            disliked: outcome.active,
            likes: outcome.likes,
            dislikes: outcome.dislikes,
        })
    }

    async fn vote(
        &self,
        post_id: Uuid,
        user_id: i64,
        vote: Vote,
    ) -> ServiceResult<forum_core::VoteOutcome> {
        PermissionService::new(self.ctx)
            .require_permission(user_id, Permissions::REACT_POSTS)
            .await?;

        let outcome = self
            .toggle(Reaction::new(post_id, user_id, ReactionKind::Vote(vote)))
            .await?
            .into_vote()
            .ok_or_else(|| ServiceError::internal("vote toggle returned a named reaction"))?;

        debug!(
            post_id = %post_id,
            user_id,
            vote = %vote,
            active = outcome.active,
            likes = outcome.likes,
            dislikes = outcome.dislikes,
            "Vote toggled"
        );
        Ok(outcome)
    }

    async fn toggle(&self, reaction: Reaction) -> ServiceResult<ToggleOutcome> {
        self.ctx
            .reaction_repo()
            .toggle(&reaction)
            .await
            .map_err(post_not_found)
    }

    /// Toggle a named reaction
    #[instrument(skip(self, request))]
    pub async fn react(
        &self,
        post_id: Uuid,
        user_id: i64,
        request: ReactRequest,
    ) -> ServiceResult<ReactToggled> {
        request.validate()?;
        let reaction_type_id = request
            .reaction_type_id
            .ok_or_else(|| ServiceError::validation("reactionTypeId is required"))?;

        PermissionService::new(self.ctx)
            .require_permission(user_id, Permissions::REACT_POSTS)
            .await?;

        let toggle = self
            .toggle(Reaction::new(post_id, user_id, ReactionKind::Named(reaction_type_id)))
            .await?
            .into_named()
            .ok_or_else(|| ServiceError::internal("named toggle returned a vote"))?;

        info!(
            post_id = %post_id,
            user_id,
            reaction = %toggle.reaction_type.name,
            reacted = toggle.reacted,
            "Reaction toggled"
        );

        Ok(ReactToggled {
            message: if toggle.reacted { "Reaction added" } else { "Reaction removed" }.to_string(),
            reacted: toggle.reacted,
            reaction_type: ReactionTypeBrief::from(toggle.reaction_type),
        })
    }

    /// Active reaction catalog
    #[instrument(skip(self))]
    pub async fn reaction_types(&self) -> ServiceResult<ReactionTypesBody> {
        let types = self.ctx.reaction_repo().find_active_types().await?;
        Ok(ReactionTypesBody {
            reaction_types: types.into_iter().map(ReactionTypeResponse::from).collect(),
        })
    }

    /// Per-type reaction counts of a post, flagged for the viewer if any
    #[instrument(skip(self))]
    pub async fn post_reactions(
        &self,
        post_id: Uuid,
        viewer: Option<i64>,
    ) -> ServiceResult<ReactionsBody> {
        let summaries = self
            .ctx
            .reaction_repo()
            .summarize(post_id, viewer)
            .await
            .map_err(post_not_found)?;

        Ok(ReactionsBody {
            reactions: summaries
                .into_iter()
                .map(ReactionSummaryResponse::from)
                .collect(),
        })
    }
}

fn post_not_found(error: DomainError) -> ServiceError {
    match error {
        DomainError::PostNotFound(id) => ServiceError::not_found("Post", id.to_string()),
        other => other.into(),
    }
}
