//! Badge database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the badges table
#[derive(Debug, Clone, FromRow)]
pub struct BadgeModel {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
