//! Badge entity - a named, point-bearing achievement definition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Stable badge codes referenced by the rule engine
///
/// Codes are the contract between rules and the seeded catalog; renaming one is
/// a breaking change.
pub mod badge_codes {
    pub const FIRST_COMMENT: &str = "first_comment";
    pub const FIRST_HIGHLY_RATED_COMMENT: &str = "first_highly_rated_comment";
    pub const FIRST_HIGHLY_RATED_CONTENT: &str = "first_highly_rated_content";
    pub const COMMUNITY_VOICE: &str = "community_voice";
    pub const CONTENT_CREATOR: &str = "content_creator";
    pub const KNOWLEDGE_SEEKER: &str = "knowledge_seeker";
    pub const FIRST_KNOWLEDGE_PATH_COMPLETED: &str = "first_knowledge_path_completed";
    pub const FIRST_KNOWLEDGE_PATH_CREATED: &str = "first_knowledge_path_created";
    pub const QUIZ_MASTER: &str = "quiz_master";
    pub const TOPIC_CURATOR: &str = "topic_curator";
    pub const TOPIC_ARCHITECT: &str = "topic_architect";
}

/// Badge catalog entry
///
/// Created by administrators/seed data; the engine only reads it. Descriptive
/// fields and `is_active` may change, `code` and `points_value` are stable once
/// rules reference them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: Snowflake,
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub points_value: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Badge {
    /// Whether the engine may award this badge
    #[inline]
    pub fn is_awardable(&self) -> bool {
        self.is_active && self.points_value >= 0
    }
}
