//! Domain entities - core business objects

mod badge;
mod user_badge;
mod vote;

pub use badge::{badge_codes, Badge};
pub use user_badge::UserBadge;
pub use vote::{Vote, VoteCount, VoteOutcome, VoteOutcomeKind};
