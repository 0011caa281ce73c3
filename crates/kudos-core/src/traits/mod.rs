//! Ports - traits the infrastructure and host platform implement

mod lookups;
mod repositories;

pub use lookups::{ProgressLookup, TargetResolver, TopicDirectory};
pub use repositories::{
    BadgeRepository, RepoResult, UserBadgeRepository, VoteCountRepository, VoteRepository,
};
