//! Business logic services
//!
//! The vote service owns ledger/aggregate mutations, the badge service owns
//! awarding, the rule engine holds the per-badge predicates, and the
//! dispatcher routes trigger events to the rules that care about them.

pub mod badge;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod rules;
pub mod vote;

// Re-export all services for convenience
pub use badge::{AwardOutcome, BadgeService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::EventDispatcher;
pub use error::{ServiceError, ServiceResult};
pub use rules::RuleEngine;
pub use vote::VoteService;
