//! Test helpers
//!
//! Builds a `ServiceContext` wired to the in-memory backend with the badge
//! catalog pre-seeded to match the production seed migration.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use kudos_core::{
    badge_codes, Badge, EntityKind, Snowflake, SnowflakeGenerator, TargetRef, TopicDirectory,
};
use kudos_service::ServiceContext;

use crate::fixtures::{FailingTopicDirectory, MemoryBackend};

/// A fully wired service context plus a handle to the backing store for
/// seeding collaborator state and inspecting rows directly.
pub struct TestWorld {
    pub backend: Arc<MemoryBackend>,
    pub ctx: Arc<ServiceContext>,
}

impl TestWorld {
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Same wiring, but every topic lookup errors. Exercises the dispatcher's
    /// rule-error isolation.
    pub fn with_failing_topics() -> Result<Self> {
        Self::build(Some(Arc::new(FailingTopicDirectory)))
    }

    fn build(topics: Option<Arc<dyn TopicDirectory>>) -> Result<Self> {
        let backend = Arc::new(MemoryBackend::new());
        seed_badges(&backend);

        let topics = match topics {
            Some(directory) => directory,
            None => backend.clone(),
        };
        let ctx = ServiceContext::builder()
            .vote_repo(backend.clone())
            .vote_count_repo(backend.clone())
            .badge_repo(backend.clone())
            .user_badge_repo(backend.clone())
            .target_resolver(backend.clone())
            .progress(backend.clone())
            .topics(topics)
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(0)))
            .build()?;

        Ok(Self {
            backend,
            ctx: Arc::new(ctx),
        })
    }

    /// Register a content item owned by `owner`
    pub fn content(&self, id: i64, owner: i64) -> TargetRef {
        let target = TargetRef::content(Snowflake::from(id));
        self.backend.add_target(target, Some(Snowflake::from(owner)));
        target
    }

    /// Register a comment owned by `owner`
    pub fn comment(&self, id: i64, owner: i64) -> TargetRef {
        let target = TargetRef::comment(Snowflake::from(id));
        self.backend.add_target(target, Some(Snowflake::from(owner)));
        target
    }

    /// Register a topic and its member contents, returning the topic id
    pub fn topic(&self, id: i64, creator: i64, contents: &[TargetRef]) -> Snowflake {
        let topic_id = Snowflake::from(id);
        let content_ids = contents
            .iter()
            .filter(|t| t.kind == EntityKind::Content)
            .map(|t| t.id)
            .collect();
        self.backend
            .add_topic(topic_id, Snowflake::from(creator), content_ids);
        topic_id
    }
}

fn seed_badges(backend: &MemoryBackend) {
    let catalog = [
        (1, badge_codes::FIRST_COMMENT, "engagement", 5),
        (2, badge_codes::FIRST_HIGHLY_RATED_COMMENT, "engagement", 15),
        (3, badge_codes::FIRST_HIGHLY_RATED_CONTENT, "creation", 25),
        (4, badge_codes::COMMUNITY_VOICE, "engagement", 30),
        (5, badge_codes::CONTENT_CREATOR, "creation", 40),
        (6, badge_codes::KNOWLEDGE_SEEKER, "learning", 30),
        (7, badge_codes::FIRST_KNOWLEDGE_PATH_COMPLETED, "learning", 25),
        (8, badge_codes::FIRST_KNOWLEDGE_PATH_CREATED, "creation", 20),
        (9, badge_codes::QUIZ_MASTER, "learning", 50),
        (10, badge_codes::TOPIC_CURATOR, "curation", 40),
        (11, badge_codes::TOPIC_ARCHITECT, "curation", 75),
    ];
    for (id, code, category, points) in catalog {
        backend.add_badge(Badge {
            id: Snowflake::from(id),
            code: code.to_string(),
            name: code.to_string(),
            description: String::new(),
            category: category.to_string(),
            points_value: points,
            is_active: true,
            created_at: Utc::now(),
        });
    }
}

/// A retired badge for not-awardable paths
pub fn inactive_badge(id: i64, code: &str) -> Badge {
    Badge {
        id: Snowflake::from(id),
        code: code.to_string(),
        name: code.to_string(),
        description: String::new(),
        category: "engagement".to_string(),
        points_value: 10,
        is_active: false,
        created_at: Utc::now(),
    }
}
