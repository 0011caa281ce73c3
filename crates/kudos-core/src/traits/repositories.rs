//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The ledger, aggregate, catalog, and award
//! tables are the only shared mutable state; all mutation goes through these
//! operations so the uniqueness and sum invariants hold.

use async_trait::async_trait;

use crate::entities::{Badge, UserBadge, Vote, VoteOutcome};
use crate::error::DomainError;
use crate::value_objects::{EntityKind, Scope, Snowflake, TargetRef, VoteDirection};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Vote Ledger
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Toggle the caller's vote and apply the resulting delta to the aggregate.
    ///
    /// Atomicity contract: the ledger upsert and the aggregate update happen in
    /// one transaction, and toggles from the same `(user, target, scope)` are
    /// serialized so concurrent double-clicks cannot both apply as deltas.
    async fn cast(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        direction: VoteDirection,
    ) -> RepoResult<VoteOutcome>;

    /// Force the caller's vote to 0 regardless of current state.
    ///
    /// Same atomicity contract as [`cast`](Self::cast).
    async fn remove(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> RepoResult<VoteOutcome>;

    /// Current vote row, if any
    async fn find(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> RepoResult<Option<Vote>>;

    /// Current values for a batch of targets of one kind (absent rows omitted)
    async fn find_values(
        &self,
        user_id: Snowflake,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<Vec<(Snowflake, i16)>>;

    /// Distinct users holding a positive vote on any of the given targets
    /// within `scope` (set aggregation, used by `topic_architect`)
    async fn count_distinct_upvoters(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<i64>;
}

// ============================================================================
// Vote Aggregator
// ============================================================================

#[async_trait]
pub trait VoteCountRepository: Send + Sync {
    /// Current total, or 0 if the pair never received a vote. Pure read; no
    /// row is created.
    async fn total(&self, target: TargetRef, scope: Scope) -> RepoResult<i64>;

    /// Get-or-create the aggregate row and add `delta`, returning the new
    /// total. The incremental hot path; callers must run it in the same
    /// transaction as the ledger write that produced the delta (the
    /// [`VoteRepository`] implementations do), so a standalone call is only
    /// appropriate for manual repair.
    async fn apply_delta(&self, target: TargetRef, scope: Scope, delta: i64) -> RepoResult<i64>;

    /// Authoritative repair: sum all ledger rows for the pair and overwrite
    /// the total. Idempotent maintenance operation, not part of the hot path.
    async fn recompute(&self, target: TargetRef, scope: Scope) -> RepoResult<i64>;

    /// Share of positive votes among active votes on the pair (0 when no
    /// votes exist). Derived read for presentation layers.
    async fn positive_ratio(&self, target: TargetRef, scope: Scope) -> RepoResult<f64>;

    /// Sum of totals over a set of targets of one kind (set aggregation)
    async fn sum_totals(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<i64>;

    /// How many of the given targets have a total at or above `threshold`
    /// (set aggregation)
    async fn count_at_least(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
        threshold: i64,
    ) -> RepoResult<i64>;
}

// ============================================================================
// Badge Catalog
// ============================================================================

#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Look up a catalog entry by its stable code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Badge>>;

    /// All currently awardable badges
    async fn find_all_active(&self) -> RepoResult<Vec<Badge>>;
}

// ============================================================================
// User Badges
// ============================================================================

#[async_trait]
pub trait UserBadgeRepository: Send + Sync {
    /// Whether the user already holds the badge
    async fn exists(&self, user_id: Snowflake, badge_id: Snowflake) -> RepoResult<bool>;

    /// Persist an award and credit `points_earned` to the user's profile in
    /// one transaction.
    ///
    /// The `(user_id, badge_id)` uniqueness constraint is the backstop against
    /// racing triggers: the loser gets `None` ("already awarded"), never an
    /// error, and does not credit points.
    async fn award(&self, user_badge: &UserBadge) -> RepoResult<Option<UserBadge>>;

    /// All badges earned by the user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBadge>>;

    /// The user's current profile point total
    async fn points(&self, user_id: Snowflake) -> RepoResult<i64>;
}
