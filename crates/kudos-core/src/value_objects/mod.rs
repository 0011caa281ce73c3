//! Value objects - immutable domain values

mod snowflake;
mod target;
mod vote_value;

pub use snowflake::{Snowflake, SnowflakeGenerator};
pub use target::{EntityKind, Scope, TargetRef};
pub use vote_value::{toggle_vote, VoteDirection, VOTE_DOWN, VOTE_NONE, VOTE_UP};
