//! Vote entity - one ledger row per (user, target, scope)

use chrono::{DateTime, Utc};

use crate::value_objects::{Scope, Snowflake, TargetRef, VOTE_NONE, VOTE_UP};

/// A user's current vote on a target within a scope
///
/// At most one row exists per `(user_id, target, scope)`; subsequent actions by
/// the same user update the row in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub user_id: Snowflake,
    pub target: TargetRef,
    pub scope: Scope,
    pub value: i16,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new Vote
    pub fn new(user_id: Snowflake, target: TargetRef, scope: Scope, value: i16) -> Self {
        Self {
            user_id,
            target,
            scope,
            value,
            created_at: Utc::now(),
        }
    }

    /// Whether this row currently counts toward the aggregate
    #[inline]
    pub fn is_active(&self) -> bool {
        self.value != VOTE_NONE
    }

    #[inline]
    pub fn is_upvote(&self) -> bool {
        self.value == VOTE_UP
    }
}

/// Denormalized running vote total per (target, scope)
///
/// Invariant: `total` equals the sum of `Vote::value` over matching ledger rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCount {
    pub target: TargetRef,
    pub scope: Scope,
    pub total: i64,
}

/// How a mutating ledger call changed the caller's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcomeKind {
    /// No vote held before, one held now
    Created,
    /// Direction flipped in a single call
    Changed,
    /// Vote withdrawn (value reset to 0)
    Removed,
    /// Nothing to do (e.g. removing a vote that was never cast)
    Unchanged,
}

/// Result of `cast` / `remove`: the applied transition plus the fresh aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// Value before the call
    pub previous_value: i16,
    /// Value after the call
    pub value: i16,
    /// Delta applied to the aggregate (value - previous_value, in -2..=2)
    pub delta: i64,
    /// Aggregate total after the delta was applied
    pub total: i64,
}

impl VoteOutcome {
    /// Build an outcome from a transition and the resulting total
    pub fn new(previous_value: i16, value: i16, total: i64) -> Self {
        Self {
            previous_value,
            value,
            delta: i64::from(value) - i64::from(previous_value),
            total,
        }
    }

    /// Classify the transition for callers
    pub fn kind(&self) -> VoteOutcomeKind {
        match (self.previous_value, self.value) {
            (a, b) if a == b => VoteOutcomeKind::Unchanged,
            (VOTE_NONE, _) => VoteOutcomeKind::Created,
            (_, VOTE_NONE) => VoteOutcomeKind::Removed,
            _ => VoteOutcomeKind::Changed,
        }
    }
}
