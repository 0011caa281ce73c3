//! Vote service
//!
//! Public contract of the voting ledger: cast/remove/read operations plus the
//! maintenance recompute. Ledger or aggregate failures propagate to the
//! caller; badge rule failures never do (the dispatcher swallows and logs
//! them), so a vote always succeeds or fails on its own merits.

use tracing::{info, instrument};

use kudos_core::entities::VoteOutcome;
use kudos_core::events::DomainEvent;
use kudos_core::value_objects::{EntityKind, Scope, Snowflake, TargetRef, VoteDirection, VOTE_NONE};

use crate::dto::VoteResponse;

use super::context::ServiceContext;
use super::dispatcher::EventDispatcher;
use super::error::{ServiceError, ServiceResult};

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's vote on a target
    ///
    /// First vote sets the direction, repeating it withdraws, the opposite
    /// direction flips in a single call.
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        direction: VoteDirection,
    ) -> ServiceResult<VoteResponse> {
        self.verify_target(target).await?;

        let outcome = self
            .ctx
            .vote_repo()
            .cast(user_id, target, scope, direction)
            .await?;

        info!(
            user_id = %user_id,
            target = %target,
            value = outcome.value,
            total = outcome.total,
            "Vote cast"
        );

        self.notify_rules(user_id, target, scope, &outcome).await;

        Ok(VoteResponse::from(&outcome))
    }

    /// Force the caller's vote to 0 regardless of current state
    #[instrument(skip(self))]
    pub async fn remove_vote(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<VoteResponse> {
        self.verify_target(target).await?;

        let outcome = self.ctx.vote_repo().remove(user_id, target, scope).await?;

        if outcome.delta != 0 {
            info!(
                user_id = %user_id,
                target = %target,
                total = outcome.total,
                "Vote removed"
            );
            self.notify_rules(user_id, target, scope, &outcome).await;
        }

        Ok(VoteResponse::from(&outcome))
    }

    /// The caller's current vote value; 0 when no vote exists or the caller
    /// is anonymous. Anonymous users may read aggregates but never hold a
    /// ledger row.
    #[instrument(skip(self))]
    pub async fn get_vote(
        &self,
        user_id: Option<Snowflake>,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<i16> {
        let Some(user_id) = user_id else {
            return Ok(VOTE_NONE);
        };

        let vote = self.ctx.vote_repo().find(user_id, target, scope).await?;
        Ok(vote.map_or(VOTE_NONE, |v| v.value))
    }

    /// The caller's vote values for a batch of targets of one kind, for list
    /// rendering. Anonymous callers get an empty result.
    #[instrument(skip(self, ids))]
    pub async fn get_votes_for_targets(
        &self,
        user_id: Option<Snowflake>,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> ServiceResult<Vec<(Snowflake, i16)>> {
        let Some(user_id) = user_id else {
            return Ok(Vec::new());
        };

        Ok(self
            .ctx
            .vote_repo()
            .find_values(user_id, kind, ids, scope)
            .await?)
    }

    /// Current aggregate total; 0 when the pair never received a vote
    #[instrument(skip(self))]
    pub async fn get_count(&self, target: TargetRef, scope: Scope) -> ServiceResult<i64> {
        Ok(self.ctx.vote_count_repo().total(target, scope).await?)
    }

    /// Share of positive votes among active votes (0 when no votes exist)
    #[instrument(skip(self))]
    pub async fn positive_ratio(&self, target: TargetRef, scope: Scope) -> ServiceResult<f64> {
        Ok(self
            .ctx
            .vote_count_repo()
            .positive_ratio(target, scope)
            .await?)
    }

    /// Maintenance: overwrite the aggregate with the authoritative ledger sum.
    ///
    /// Idempotent; used by integrity-check tooling when an aggregate has
    /// drifted, never on the hot path.
    #[instrument(skip(self))]
    pub async fn recompute(&self, target: TargetRef, scope: Scope) -> ServiceResult<i64> {
        let total = self.ctx.vote_count_repo().recompute(target, scope).await?;
        info!(target = %target, total, "Vote count recomputed from ledger");
        Ok(total)
    }

    async fn verify_target(&self, target: TargetRef) -> ServiceResult<()> {
        if self.ctx.target_resolver().exists(target).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Target", target.to_string()))
        }
    }

    /// Hand the aggregate update to the badge rules. Rule failures are logged
    /// inside the dispatcher and never surface here.
    async fn notify_rules(
        &self,
        voter_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        outcome: &VoteOutcome,
    ) {
        let event = DomainEvent::VoteCountUpdated {
            voter_id,
            target,
            scope,
            total: outcome.total,
        };
        EventDispatcher::new(self.ctx).dispatch(&event).await;
    }
}
