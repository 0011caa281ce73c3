//! Vote database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub user_id: i64,
    pub target_kind: i16,
    pub target_id: i64,
    pub scope: Option<i64>,
    pub value: i16,
    pub created_at: DateTime<Utc>,
}

/// Positive/active vote counts for the ratio query
#[derive(Debug, Clone, FromRow)]
pub struct VoteRatioModel {
    pub positive: i64,
    pub active: i64,
}
