//! # kudos-core
//!
//! Domain layer for the voting ledger and badge engine: entities, value objects,
//! repository traits, lookup traits for external collaborators, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{badge_codes, Badge, UserBadge, Vote, VoteCount, VoteOutcome, VoteOutcomeKind};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    BadgeRepository, ProgressLookup, RepoResult, TargetResolver, TopicDirectory,
    UserBadgeRepository, VoteCountRepository, VoteRepository,
};
pub use value_objects::{
    toggle_vote, EntityKind, Scope, Snowflake, SnowflakeGenerator, TargetRef, VoteDirection,
};
