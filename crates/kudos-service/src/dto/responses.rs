//! Response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use kudos_core::entities::{Badge, UserBadge, VoteOutcome, VoteOutcomeKind};

/// Result of a vote mutation, as shown to the voting user
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    /// The caller's vote value after the call
    pub value: i16,
    /// Aggregate total after the call
    pub total: i64,
    /// What the call did: "created", "changed", "removed", or "unchanged"
    pub status: &'static str,
}

impl From<&VoteOutcome> for VoteResponse {
    fn from(outcome: &VoteOutcome) -> Self {
        let status = match outcome.kind() {
            VoteOutcomeKind::Created => "created",
            VoteOutcomeKind::Changed => "changed",
            VoteOutcomeKind::Removed => "removed",
            VoteOutcomeKind::Unchanged => "unchanged",
        };
        Self {
            value: outcome.value,
            total: outcome.total,
            status,
        }
    }
}

/// Badge catalog entry for display
#[derive(Debug, Clone, Serialize)]
pub struct BadgeResponse {
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
}

impl From<&Badge> for BadgeResponse {
    fn from(badge: &Badge) -> Self {
        Self {
            code: badge.code.clone(),
            name: badge.name.clone(),
            description: badge.description.clone(),
            category: badge.category.clone(),
            points_value: badge.points_value,
        }
    }
}

/// A badge earned by a user
#[derive(Debug, Clone, Serialize)]
pub struct EarnedBadgeResponse {
    pub badge_id: i64,
    pub points_earned: i32,
    pub context: Map<String, Value>,
    pub earned_at: DateTime<Utc>,
}

impl From<&UserBadge> for EarnedBadgeResponse {
    fn from(earned: &UserBadge) -> Self {
        Self {
            badge_id: earned.badge_id.into_inner(),
            points_earned: earned.points_earned,
            context: earned.context.clone(),
            earned_at: earned.earned_at,
        }
    }
}

/// A user's earned badges with their running point total
#[derive(Debug, Clone, Serialize)]
pub struct ProfileBadgesResponse {
    pub badges: Vec<EarnedBadgeResponse>,
    pub total_points: i64,
}

impl ProfileBadgesResponse {
    pub fn new(earned: &[UserBadge], total_points: i64) -> Self {
        Self {
            badges: earned.iter().map(EarnedBadgeResponse::from).collect(),
            total_points,
        }
    }
}
