//! UserBadge entity <-> model mapper

use kudos_core::entities::UserBadge;
use kudos_core::value_objects::Snowflake;
use serde_json::{Map, Value};

use crate::models::UserBadgeModel;

impl From<UserBadgeModel> for UserBadge {
    fn from(model: UserBadgeModel) -> Self {
        // Context is declared JSONB object; tolerate non-object values from
        // manual writes by treating them as empty evidence
        let context = match model.context {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        UserBadge {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            badge_id: Snowflake::new(model.badge_id),
            points_earned: model.points_earned,
            context,
            earned_at: model.earned_at,
        }
    }
}
