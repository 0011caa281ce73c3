//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in kudos-core.
//! The ledger repository owns the vote/aggregate transaction; the award
//! repository owns the badge/points transaction.

mod badge;
mod error;
mod user_badge;
mod vote;
mod vote_count;

pub use badge::PgBadgeRepository;
pub use user_badge::PgUserBadgeRepository;
pub use vote::PgVoteRepository;
pub use vote_count::PgVoteCountRepository;
