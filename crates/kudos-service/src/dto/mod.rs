//! Data transfer objects exposed to the embedding API layer

mod responses;

pub use responses::{BadgeResponse, EarnedBadgeResponse, ProfileBadgesResponse, VoteResponse};
