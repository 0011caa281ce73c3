//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, TargetRef};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Target not found: {0}")]
    TargetNotFound(TargetRef),

    #[error("Badge not found: {0}")]
    BadgeNotFound(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Badge is inactive: {0}")]
    BadgeInactive(String),

    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i16),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Badge already awarded: user {user_id} badge {badge_id}")]
    BadgeAlreadyAwarded {
        user_id: Snowflake,
        badge_id: Snowflake,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) => "UNKNOWN_TARGET",
            Self::BadgeNotFound(_) => "UNKNOWN_BADGE",
            Self::TopicNotFound(_) => "UNKNOWN_TOPIC",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::BadgeInactive(_) => "BADGE_INACTIVE",
            Self::InvalidVoteValue(_) => "INVALID_VOTE_VALUE",
            Self::BadgeAlreadyAwarded { .. } => "BADGE_ALREADY_AWARDED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::LookupError(_) => "LOOKUP_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TargetNotFound(_) | Self::BadgeNotFound(_) | Self::TopicNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::BadgeInactive(_) | Self::InvalidVoteValue(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::BadgeAlreadyAwarded { .. })
    }
}
