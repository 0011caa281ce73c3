//! Service context - dependency container for services
//!
//! Holds the repositories, external-collaborator lookups, and the id
//! generator. Services borrow it per call, so one context instance backs the
//! whole application.

use std::sync::Arc;

use kudos_core::traits::{
    BadgeRepository, ProgressLookup, TargetResolver, TopicDirectory, UserBadgeRepository,
    VoteCountRepository, VoteRepository,
};
use kudos_core::{Snowflake, SnowflakeGenerator};

/// Service context containing all dependencies
///
/// Provides access to:
/// - The vote ledger and aggregate repositories
/// - The badge catalog and award repositories
/// - Read-only lookups into the host platform (targets, progress, topics)
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    vote_repo: Arc<dyn VoteRepository>,
    vote_count_repo: Arc<dyn VoteCountRepository>,
    badge_repo: Arc<dyn BadgeRepository>,
    user_badge_repo: Arc<dyn UserBadgeRepository>,

    target_resolver: Arc<dyn TargetResolver>,
    progress: Arc<dyn ProgressLookup>,
    topics: Arc<dyn TopicDirectory>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vote_repo: Arc<dyn VoteRepository>,
        vote_count_repo: Arc<dyn VoteCountRepository>,
        badge_repo: Arc<dyn BadgeRepository>,
        user_badge_repo: Arc<dyn UserBadgeRepository>,
        target_resolver: Arc<dyn TargetResolver>,
        progress: Arc<dyn ProgressLookup>,
        topics: Arc<dyn TopicDirectory>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            vote_repo,
            vote_count_repo,
            badge_repo,
            user_badge_repo,
            target_resolver,
            progress,
            topics,
            snowflake_generator,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the vote ledger repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the vote aggregate repository
    pub fn vote_count_repo(&self) -> &dyn VoteCountRepository {
        self.vote_count_repo.as_ref()
    }

    /// Get the badge catalog repository
    pub fn badge_repo(&self) -> &dyn BadgeRepository {
        self.badge_repo.as_ref()
    }

    /// Get the user badge repository
    pub fn user_badge_repo(&self) -> &dyn UserBadgeRepository {
        self.user_badge_repo.as_ref()
    }

    // === External lookups ===

    /// Get the target resolver
    pub fn target_resolver(&self) -> &dyn TargetResolver {
        self.target_resolver.as_ref()
    }

    /// Get the progress lookup
    pub fn progress(&self) -> &dyn ProgressLookup {
        self.progress.as_ref()
    }

    /// Get the topic directory
    pub fn topics(&self) -> &dyn TopicDirectory {
        self.topics.as_ref()
    }

    // === Services ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("lookups", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    vote_repo: Option<Arc<dyn VoteRepository>>,
    vote_count_repo: Option<Arc<dyn VoteCountRepository>>,
    badge_repo: Option<Arc<dyn BadgeRepository>>,
    user_badge_repo: Option<Arc<dyn UserBadgeRepository>>,
    target_resolver: Option<Arc<dyn TargetResolver>>,
    progress: Option<Arc<dyn ProgressLookup>>,
    topics: Option<Arc<dyn TopicDirectory>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn vote_count_repo(mut self, repo: Arc<dyn VoteCountRepository>) -> Self {
        self.vote_count_repo = Some(repo);
        self
    }

    pub fn badge_repo(mut self, repo: Arc<dyn BadgeRepository>) -> Self {
        self.badge_repo = Some(repo);
        self
    }

    pub fn user_badge_repo(mut self, repo: Arc<dyn UserBadgeRepository>) -> Self {
        self.user_badge_repo = Some(repo);
        self
    }

    pub fn target_resolver(mut self, resolver: Arc<dyn TargetResolver>) -> Self {
        self.target_resolver = Some(resolver);
        self
    }

    pub fn progress(mut self, lookup: Arc<dyn ProgressLookup>) -> Self {
        self.progress = Some(lookup);
        self
    }

    pub fn topics(mut self, directory: Arc<dyn TopicDirectory>) -> Self {
        self.topics = Some(directory);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Fill the four persistence slots with the PostgreSQL repositories.
    ///
    /// The lookup slots still have to be supplied by the host platform, which
    /// owns the content, progress, and topic data.
    pub fn with_postgres(self, pool: kudos_db::PgPool) -> Self {
        self.vote_repo(Arc::new(kudos_db::PgVoteRepository::new(pool.clone())))
            .vote_count_repo(Arc::new(kudos_db::PgVoteCountRepository::new(pool.clone())))
            .badge_repo(Arc::new(kudos_db::PgBadgeRepository::new(pool.clone())))
            .user_badge_repo(Arc::new(kudos_db::PgUserBadgeRepository::new(pool)))
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            self.vote_count_repo
                .ok_or_else(|| ServiceError::validation("vote_count_repo is required"))?,
            self.badge_repo
                .ok_or_else(|| ServiceError::validation("badge_repo is required"))?,
            self.user_badge_repo
                .ok_or_else(|| ServiceError::validation("user_badge_repo is required"))?,
            self.target_resolver
                .ok_or_else(|| ServiceError::validation("target_resolver is required"))?,
            self.progress
                .ok_or_else(|| ServiceError::validation("progress is required"))?,
            self.topics
                .ok_or_else(|| ServiceError::validation("topics is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
