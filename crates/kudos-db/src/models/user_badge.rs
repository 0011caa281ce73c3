//! UserBadge database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// Database model for the user_badges table
#[derive(Debug, Clone, FromRow)]
pub struct UserBadgeModel {
    pub id: i64,
    pub user_id: i64,
    pub badge_id: i64,
    pub points_earned: i32,
    /// JSONB evidence column
    pub context: Value,
    pub earned_at: DateTime<Utc>,
}
