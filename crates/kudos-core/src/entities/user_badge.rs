//! UserBadge entity - the one-time award of a badge to a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Badge;
use crate::value_objects::Snowflake;

/// A badge earned by a user
///
/// At most one row per `(user_id, badge_id)`; awarding is monotonic - once
/// created the row is never deleted or re-awarded. `points_earned` snapshots
/// `Badge::points_value` at award time so later catalog edits do not rewrite
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadge {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub badge_id: Snowflake,
    pub points_earned: i32,
    /// Free-form evidence for the award, e.g. `{"knowledge_path_id": 7}`
    pub context: Map<String, Value>,
    pub earned_at: DateTime<Utc>,
}

impl UserBadge {
    /// Build an award row for `user` from the catalog entry
    pub fn award(id: Snowflake, user_id: Snowflake, badge: &Badge, context: Map<String, Value>) -> Self {
        Self {
            id,
            user_id,
            badge_id: badge.id,
            points_earned: badge.points_value,
            context,
            earned_at: Utc::now(),
        }
    }
}
