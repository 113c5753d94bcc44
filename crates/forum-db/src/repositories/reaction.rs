//! PostgreSQL implementation of ReactionRepository
//!
//! Exclusive reactions (votes) and named reactions live in separate tables.
//! Every toggle locks the post row first, so concurrent toggles on one post
//! serialize and the denormalized counters always match the rows.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{
    Reaction, ReactionKind, ReactionSummary, ReactionToggle, ReactionType, ToggleOutcome, Vote,
    VoteOutcome, VoteSlot,
};
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, RepoResult};

use crate::models::{ReactionSummaryModel, ReactionTypeModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn lock_post(tx: &mut Transaction<'_, Postgres>, post_id: Uuid) -> RepoResult<()> {
        let found = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM forum_posts WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

        found.map(|_| ()).ok_or(DomainError::PostNotFound(post_id))
    }

    /// Exclusive slot: one row per user and post in `forum_post_votes`
    async fn toggle_vote(
        tx: &mut Transaction<'_, Postgres>,
        reaction: &Reaction,
        vote: Vote,
    ) -> RepoResult<VoteOutcome> {
        let current = sqlx::query_scalar::<_, String>(
            r#"
            SELECT vote FROM forum_post_votes WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(reaction.post_id)
        .bind(reaction.user_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .map(|v| v.parse::<Vote>())
        .transpose()?;

        let slot = VoteSlot::apply(current, vote);

        match slot.next {
            None => {
                sqlx::query(
                    r#"
                    DELETE FROM forum_post_votes WHERE post_id = $1 AND user_id = $2
                    "#,
                )
                .bind(reaction.post_id)
                .bind(reaction.user_id)
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?;
            }
            Some(next) => {
                sqlx::query(
                    r#"
                    INSERT INTO forum_post_votes (post_id, user_id, vote, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $4)
                    ON CONFLICT (post_id, user_id)
                    DO UPDATE SET vote = EXCLUDED.vote, updated_at = EXCLUDED.updated_at
                    "#,
                )
                .bind(reaction.post_id)
                .bind(reaction.user_id)
                .bind(next.as_str())
                .bind(reaction.created_at)
                .execute(&mut **tx)
                .await
                .map_err(|e| {
                    map_foreign_key_violation(e, || DomainError::UserNotFound(reaction.user_id))
                })?;
            }
        }

        let (likes, dislikes) = sqlx::query_as::<_, (i32, i32)>(
            r#"
            UPDATE forum_posts
            SET likes = likes + $2, dislikes = dislikes + $3
            WHERE id = $1
            RETURNING likes, dislikes
            "#,
        )
        .bind(reaction.post_id)
        .bind(slot.like_delta)
        .bind(slot.dislike_delta)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(VoteOutcome {
            vote,
            active: slot.is_active(vote),
            likes,
            dislikes,
        })
    }

    /// Multi slot: one row per user, post and type in `forum_post_reactions`
    async fn toggle_named(
        tx: &mut Transaction<'_, Postgres>,
        reaction: &Reaction,
        reaction_type_id: i32,
    ) -> RepoResult<ReactionToggle> {
        let reaction_type = sqlx::query_as::<_, ReactionTypeModel>(
            r#"
            SELECT id, emoji, name, description, is_active, created_at
            FROM forum_reaction_types
            WHERE id = $1
            "#,
        )
        .bind(reaction_type_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?
        .map(ReactionType::from)
        .filter(|rt| rt.is_active)
        .ok_or(DomainError::InvalidReactionType(reaction_type_id))?;

        let removed = sqlx::query(
            r#"
            DELETE FROM forum_post_reactions
            WHERE post_id = $1 AND user_id = $2 AND reaction_type_id = $3
            "#,
        )
        .bind(reaction.post_id)
        .bind(reaction.user_id)
        .bind(reaction_type_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let reacted = removed == 0;
        if reacted {
            sqlx::query(
                r#"
                INSERT INTO forum_post_reactions (post_id, user_id, reaction_type_id, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(reaction.post_id)
            .bind(reaction.user_id)
            .bind(reaction_type_id)
            .bind(reaction.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                map_foreign_key_violation(e, || DomainError::UserNotFound(reaction.user_id))
            })?;
        }

        let delta: i32 = if reacted { 1 } else { -1 };
        let reactions_count = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE forum_posts
            SET reactions_count = reactions_count + $2
            WHERE id = $1
            RETURNING reactions_count
            "#,
        )
        .bind(reaction.post_id)
        .bind(delta)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(ReactionToggle {
            reaction_type,
            reacted,
            reactions_count,
        })
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_active_types(&self) -> RepoResult<Vec<ReactionType>> {
        let results = sqlx::query_as::<_, ReactionTypeModel>(
            r#"
            SELECT id, emoji, name, description, is_active, created_at
            FROM forum_reaction_types
            WHERE is_active = TRUE
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionType::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_type(&self, id: i32) -> RepoResult<Option<ReactionType>> {
        let result = sqlx::query_as::<_, ReactionTypeModel>(
            r#"
            SELECT id, emoji, name, description, is_active, created_at
            FROM forum_reaction_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReactionType::from))
    }

    #[instrument(skip(self))]
    async fn find_vote(&self, post_id: Uuid, user_id: i64) -> RepoResult<Option<Vote>> {
        let vote = sqlx::query_scalar::<_, String>(
            r#"
            SELECT vote FROM forum_post_votes WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        vote.map(|v| v.parse()).transpose()
    }

    #[instrument(skip(self, reaction), fields(post_id = %reaction.post_id, user_id = reaction.user_id))]
    async fn toggle(&self, reaction: &Reaction) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        Self::lock_post(&mut tx, reaction.post_id).await?;

        let outcome = match reaction.kind {
            ReactionKind::Vote(vote) => {
                ToggleOutcome::Vote(Self::toggle_vote(&mut tx, reaction, vote).await?)
            }
            ReactionKind::Named(type_id) => {
                ToggleOutcome::Named(Self::toggle_named(&mut tx, reaction, type_id).await?)
            }
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn summarize(
        &self,
        post_id: Uuid,
        viewer: Option<i64>,
    ) -> RepoResult<Vec<ReactionSummary>> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM forum_posts WHERE id = $1)
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if !exists {
            return Err(DomainError::PostNotFound(post_id));
        }

        let results = sqlx::query_as::<_, ReactionSummaryModel>(
            r#"
            SELECT rt.id AS reaction_type_id,
                   rt.emoji,
                   rt.name,
                   COUNT(r.user_id) AS count,
                   COALESCE(BOOL_OR(r.user_id = $2::bigint), FALSE) AS user_reacted
            FROM forum_reaction_types rt
            LEFT JOIN forum_post_reactions r
                   ON r.reaction_type_id = rt.id AND r.post_id = $1
            WHERE rt.is_active = TRUE
            GROUP BY rt.id, rt.emoji, rt.name
            HAVING COUNT(r.user_id) > 0
                OR COALESCE(BOOL_OR(r.user_id = $2::bigint), FALSE)
            ORDER BY count DESC, rt.id ASC
            "#,
        )
        .bind(post_id)
        .bind(viewer)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_reactions(&self, post_id: Uuid) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM forum_post_reactions WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
