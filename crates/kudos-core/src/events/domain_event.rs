//! Domain events - events emitted when domain state changes
//!
//! These are the five trigger kinds the dispatcher routes to badge rules.
//! Collaborators deliver them synchronously right after their own write
//! commits; vote mutations emit `VoteCountUpdated` themselves.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Scope, Snowflake, TargetRef};

/// All trigger events the rule engine consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    /// A vote mutation landed and the aggregate was updated
    VoteCountUpdated {
        voter_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        total: i64,
    },

    /// A comment was created by `author_id`
    CommentCreated {
        author_id: Snowflake,
        comment_id: Snowflake,
    },

    /// A node completion was recorded (`is_completed = true`)
    NodeCompleted {
        user_id: Snowflake,
        knowledge_path_id: Snowflake,
        /// Whether the whole path is now fully complete
        path_completed: bool,
    },

    /// A node was added to a knowledge path
    NodeCreated {
        author_id: Snowflake,
        knowledge_path_id: Snowflake,
        /// Node count of the path after the insert
        node_count: i64,
    },

    /// A quiz attempt was recorded
    QuizAttemptRecorded {
        user_id: Snowflake,
        quiz_id: Snowflake,
        perfect_score: bool,
    },
}

impl DomainEvent {
    /// Event name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::VoteCountUpdated { .. } => "VOTE_COUNT_UPDATED",
            Self::CommentCreated { .. } => "COMMENT_CREATED",
            Self::NodeCompleted { .. } => "NODE_COMPLETED",
            Self::NodeCreated { .. } => "NODE_CREATED",
            Self::QuizAttemptRecorded { .. } => "QUIZ_ATTEMPT_RECORDED",
        }
    }
}
