//! Badge entity <-> model mapper

use kudos_core::entities::Badge;
use kudos_core::value_objects::Snowflake;

use crate::models::BadgeModel;

impl From<BadgeModel> for Badge {
    fn from(model: BadgeModel) -> Self {
        Badge {
            id: Snowflake::new(model.id),
            code: model.code,
            name: model.name,
            description: model.description,
            category: model.category,
            points_value: model.points_value,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
