//! Vote values and the toggle transition
//!
//! The toggle is the single source of the new-vote / withdraw / flip semantics;
//! the ledger repository applies it inside its transaction.

use serde::{Deserialize, Serialize};

/// Stored value of an upvote
pub const VOTE_UP: i16 = 1;
/// Stored value of a withdrawn vote
pub const VOTE_NONE: i16 = 0;
/// Stored value of a downvote
pub const VOTE_DOWN: i16 = -1;

/// Direction requested by a voting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// The ledger value this direction writes
    #[must_use]
    pub const fn value(self) -> i16 {
        match self {
            Self::Up => VOTE_UP,
            Self::Down => VOTE_DOWN,
        }
    }
}

/// Compute the next vote value when a user votes in `direction` while their
/// current value is `current`.
///
/// - no vote (or withdrawn) -> the requested direction
/// - same direction again   -> withdrawn (0)
/// - opposite direction     -> flipped in a single call
#[must_use]
pub const fn toggle_vote(current: i16, direction: VoteDirection) -> i16 {
    if current == direction.value() {
        VOTE_NONE
    } else {
        direction.value()
    }
}
