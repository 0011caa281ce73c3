//! Database models - SQLx-compatible structs for PostgreSQL tables

mod badge;
mod user_badge;
mod vote;

pub use badge::BadgeModel;
pub use user_badge::UserBadgeModel;
pub use vote::{VoteModel, VoteRatioModel};
