//! Lookup traits for external collaborators
//!
//! Content, comments, knowledge paths, topics, and quiz records live in the
//! host platform; the rule engine only needs these read-only views of them.
//! Every count here is expected to be a bounded aggregate query on the host
//! side, never a row-by-row scan in application code.

use async_trait::async_trait;

use crate::traits::RepoResult;
use crate::value_objects::{EntityKind, Snowflake, TargetRef};

/// Resolves polymorphic targets to existence and ownership
#[async_trait]
pub trait TargetResolver: Send + Sync {
    /// Whether the referenced entity exists
    async fn exists(&self, target: TargetRef) -> RepoResult<bool>;

    /// Owner of the referenced entity, if it exists and has one
    async fn owner_of(&self, target: TargetRef) -> RepoResult<Option<Snowflake>>;

    /// Ids of all entities of `kind` owned by `owner`
    async fn owned_by(&self, kind: EntityKind, owner_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

/// Externally-maintained engagement and learning-progress counters
#[async_trait]
pub trait ProgressLookup: Send + Sync {
    /// Number of comments authored by the user
    async fn comment_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Number of nodes the user has completed
    async fn completed_node_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Number of knowledge paths the user has fully completed
    async fn completed_path_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Number of the user's quiz attempts with a perfect score
    async fn perfect_quiz_count(&self, user_id: Snowflake) -> RepoResult<i64>;
}

/// Topic metadata for the topic-scoped rules
#[async_trait]
pub trait TopicDirectory: Send + Sync {
    /// Creator of the topic, if the topic exists
    async fn creator(&self, topic_id: Snowflake) -> RepoResult<Option<Snowflake>>;

    /// Ids of the contents attached to the topic
    async fn content_ids(&self, topic_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}
