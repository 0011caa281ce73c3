//! Badge rule engine
//!
//! One method per catalog badge. Every rule is stateless per invocation: the
//! only persistent state is the monotonic `UserBadge` existence flag, so each
//! check reads counters fresh and is safe to re-run on every qualifying
//! event. All "first X" rules check `has_badge` before touching anything
//! expensive, and the aggregation-heavy rules go through the set-aggregation
//! repository operations rather than iterating rows here.

use serde_json::{json, Map};
use tracing::instrument;

use kudos_core::entities::badge_codes;
use kudos_core::value_objects::{EntityKind, Scope, Snowflake, TargetRef};

use super::badge::{AwardOutcome, BadgeService};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Aggregate total at which a comment counts as highly rated
const HIGHLY_RATED_COMMENT_TOTAL: i64 = 5;
/// Aggregate total at which a content item counts as highly rated
const HIGHLY_RATED_CONTENT_TOTAL: i64 = 10;
/// Summed total over all of a user's comments for `community_voice`
const COMMUNITY_VOICE_TOTAL: i64 = 20;
/// `content_creator` needs this many content items ...
const CONTENT_CREATOR_RATED_COUNT: i64 = 3;
/// ... each at or above this total
const CONTENT_CREATOR_RATED_TOTAL: i64 = 5;
/// Completed nodes for `knowledge_seeker`
const KNOWLEDGE_SEEKER_NODES: i64 = 20;
/// A path counts as created once it holds this many nodes
const PATH_CREATED_MIN_NODES: i64 = 2;
/// Perfect-score quiz attempts for `quiz_master`
const QUIZ_MASTER_PERFECT_COUNT: i64 = 5;
/// `topic_curator` needs a topic with this many contents ...
const TOPIC_CURATOR_MIN_CONTENTS: usize = 5;
/// ... of which this many have a topic-scoped total of at least 1
const TOPIC_CURATOR_RATED_COUNT: i64 = 2;
/// `topic_architect` thresholds: rated contents, summed total, distinct voters
const TOPIC_ARCHITECT_RATED_COUNT: i64 = 10;
const TOPIC_ARCHITECT_SUM_TOTAL: i64 = 50;
const TOPIC_ARCHITECT_DISTINCT_VOTERS: i64 = 5;

/// Badge rule engine
pub struct RuleEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleEngine<'a> {
    /// Create a new RuleEngine
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn badges(&self) -> BadgeService<'a> {
        BadgeService::new(self.ctx)
    }

    /// `first_comment`: the user's very first comment
    #[instrument(skip(self))]
    pub async fn check_first_comment(&self, user_id: Snowflake) -> ServiceResult<AwardOutcome> {
        let badges = self.badges();
        if badges.has_badge(user_id, badge_codes::FIRST_COMMENT).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if self.ctx.progress().comment_count(user_id).await? != 1 {
            return Ok(AwardOutcome::NotAwardable);
        }
        badges
            .award(user_id, badge_codes::FIRST_COMMENT, Map::new())
            .await
    }

    /// `first_highly_rated_comment`: one of the author's comments reached the
    /// highly-rated total
    #[instrument(skip(self))]
    pub async fn check_first_highly_rated_comment(
        &self,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<AwardOutcome> {
        self.check_first_highly_rated(
            target,
            scope,
            badge_codes::FIRST_HIGHLY_RATED_COMMENT,
            HIGHLY_RATED_COMMENT_TOTAL,
        )
        .await
    }

    /// `first_highly_rated_content`: one of the author's content items
    /// reached the highly-rated total
    #[instrument(skip(self))]
    pub async fn check_first_highly_rated_content(
        &self,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<AwardOutcome> {
        self.check_first_highly_rated(
            target,
            scope,
            badge_codes::FIRST_HIGHLY_RATED_CONTENT,
            HIGHLY_RATED_CONTENT_TOTAL,
        )
        .await
    }

    async fn check_first_highly_rated(
        &self,
        target: TargetRef,
        scope: Scope,
        code: &str,
        threshold: i64,
    ) -> ServiceResult<AwardOutcome> {
        let Some(owner_id) = self.ctx.target_resolver().owner_of(target).await? else {
            return Ok(AwardOutcome::NotAwardable);
        };
        let badges = self.badges();
        if badges.has_badge(owner_id, code).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if self.ctx.vote_count_repo().total(target, scope).await? < threshold {
            return Ok(AwardOutcome::NotAwardable);
        }
        let mut context = Map::new();
        context.insert("target".into(), json!(target.to_string()));
        badges.award(owner_id, code, context).await
    }

    /// `community_voice`: the author's comments collected enough votes overall
    #[instrument(skip(self))]
    pub async fn check_community_voice(
        &self,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<AwardOutcome> {
        let Some(owner_id) = self.ctx.target_resolver().owner_of(target).await? else {
            return Ok(AwardOutcome::NotAwardable);
        };
        let badges = self.badges();
        if badges.has_badge(owner_id, badge_codes::COMMUNITY_VOICE).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        let comment_ids = self
            .ctx
            .target_resolver()
            .owned_by(EntityKind::Comment, owner_id)
            .await?;
        if comment_ids.is_empty() {
            return Ok(AwardOutcome::NotAwardable);
        }
        let sum = self
            .ctx
            .vote_count_repo()
            .sum_totals(EntityKind::Comment, &comment_ids, scope)
            .await?;
        if sum < COMMUNITY_VOICE_TOTAL {
            return Ok(AwardOutcome::NotAwardable);
        }
        badges
            .award(owner_id, badge_codes::COMMUNITY_VOICE, Map::new())
            .await
    }

    /// `content_creator`: enough of the author's content items are
    /// individually well rated
    #[instrument(skip(self))]
    pub async fn check_content_creator(
        &self,
        target: TargetRef,
        scope: Scope,
    ) -> ServiceResult<AwardOutcome> {
        let Some(owner_id) = self.ctx.target_resolver().owner_of(target).await? else {
            return Ok(AwardOutcome::NotAwardable);
        };
        let badges = self.badges();
        if badges.has_badge(owner_id, badge_codes::CONTENT_CREATOR).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        let content_ids = self
            .ctx
            .target_resolver()
            .owned_by(EntityKind::Content, owner_id)
            .await?;
        if (content_ids.len() as i64) < CONTENT_CREATOR_RATED_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        let rated = self
            .ctx
            .vote_count_repo()
            .count_at_least(
                EntityKind::Content,
                &content_ids,
                scope,
                CONTENT_CREATOR_RATED_TOTAL,
            )
            .await?;
        if rated < CONTENT_CREATOR_RATED_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        badges
            .award(owner_id, badge_codes::CONTENT_CREATOR, Map::new())
            .await
    }

    /// `knowledge_seeker`: the user completed enough nodes
    #[instrument(skip(self))]
    pub async fn check_knowledge_seeker(&self, user_id: Snowflake) -> ServiceResult<AwardOutcome> {
        let badges = self.badges();
        if badges.has_badge(user_id, badge_codes::KNOWLEDGE_SEEKER).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if self.ctx.progress().completed_node_count(user_id).await? < KNOWLEDGE_SEEKER_NODES {
            return Ok(AwardOutcome::NotAwardable);
        }
        badges
            .award(user_id, badge_codes::KNOWLEDGE_SEEKER, Map::new())
            .await
    }

    /// `first_knowledge_path_completed`: the user finished their first full
    /// knowledge path. Only invoked when the triggering completion finished a
    /// path, so the counter read is a cheap confirmation.
    #[instrument(skip(self))]
    pub async fn check_first_path_completed(
        &self,
        user_id: Snowflake,
        knowledge_path_id: Snowflake,
    ) -> ServiceResult<AwardOutcome> {
        let badges = self.badges();
        if badges
            .has_badge(user_id, badge_codes::FIRST_KNOWLEDGE_PATH_COMPLETED)
            .await?
        {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if self.ctx.progress().completed_path_count(user_id).await? < 1 {
            return Ok(AwardOutcome::NotAwardable);
        }
        let mut context = Map::new();
        context.insert("knowledge_path_id".into(), json!(knowledge_path_id));
        badges
            .award(user_id, badge_codes::FIRST_KNOWLEDGE_PATH_COMPLETED, context)
            .await
    }

    /// `first_knowledge_path_created`: the user's authored path reached the
    /// minimum node count
    #[instrument(skip(self))]
    pub async fn check_first_path_created(
        &self,
        user_id: Snowflake,
        knowledge_path_id: Snowflake,
        node_count: i64,
    ) -> ServiceResult<AwardOutcome> {
        let badges = self.badges();
        if badges
            .has_badge(user_id, badge_codes::FIRST_KNOWLEDGE_PATH_CREATED)
            .await?
        {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if node_count < PATH_CREATED_MIN_NODES {
            return Ok(AwardOutcome::NotAwardable);
        }
        let mut context = Map::new();
        context.insert("knowledge_path_id".into(), json!(knowledge_path_id));
        badges
            .award(user_id, badge_codes::FIRST_KNOWLEDGE_PATH_CREATED, context)
            .await
    }

    /// `quiz_master`: enough perfect-score quiz attempts
    #[instrument(skip(self))]
    pub async fn check_quiz_master(&self, user_id: Snowflake) -> ServiceResult<AwardOutcome> {
        let badges = self.badges();
        if badges.has_badge(user_id, badge_codes::QUIZ_MASTER).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        if self.ctx.progress().perfect_quiz_count(user_id).await? < QUIZ_MASTER_PERFECT_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        badges
            .award(user_id, badge_codes::QUIZ_MASTER, Map::new())
            .await
    }

    /// `topic_curator`: the topic's creator assembled enough contents and a
    /// couple of them drew topic-scoped votes
    #[instrument(skip(self))]
    pub async fn check_topic_curator(&self, topic_id: Snowflake) -> ServiceResult<AwardOutcome> {
        let Some(creator_id) = self.ctx.topics().creator(topic_id).await? else {
            return Ok(AwardOutcome::NotAwardable);
        };
        let badges = self.badges();
        if badges.has_badge(creator_id, badge_codes::TOPIC_CURATOR).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        let content_ids = self.ctx.topics().content_ids(topic_id).await?;
        if content_ids.len() < TOPIC_CURATOR_MIN_CONTENTS {
            return Ok(AwardOutcome::NotAwardable);
        }
        let rated = self
            .ctx
            .vote_count_repo()
            .count_at_least(EntityKind::Content, &content_ids, Some(topic_id), 1)
            .await?;
        if rated < TOPIC_CURATOR_RATED_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        let mut context = Map::new();
        context.insert("topic_id".into(), json!(topic_id));
        badges
            .award(creator_id, badge_codes::TOPIC_CURATOR, context)
            .await
    }

    /// `topic_architect`: the topic is broadly rated, heavily voted, and
    /// endorsed by enough distinct voters. Checks run cheapest first so the
    /// common miss costs a single count query.
    #[instrument(skip(self))]
    pub async fn check_topic_architect(&self, topic_id: Snowflake) -> ServiceResult<AwardOutcome> {
        let Some(creator_id) = self.ctx.topics().creator(topic_id).await? else {
            return Ok(AwardOutcome::NotAwardable);
        };
        let badges = self.badges();
        if badges
            .has_badge(creator_id, badge_codes::TOPIC_ARCHITECT)
            .await?
        {
            return Ok(AwardOutcome::AlreadyHeld);
        }
        let content_ids = self.ctx.topics().content_ids(topic_id).await?;
        if (content_ids.len() as i64) < TOPIC_ARCHITECT_RATED_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        let scope = Some(topic_id);
        let rated = self
            .ctx
            .vote_count_repo()
            .count_at_least(EntityKind::Content, &content_ids, scope, 1)
            .await?;
        if rated < TOPIC_ARCHITECT_RATED_COUNT {
            return Ok(AwardOutcome::NotAwardable);
        }
        let sum = self
            .ctx
            .vote_count_repo()
            .sum_totals(EntityKind::Content, &content_ids, scope)
            .await?;
        if sum < TOPIC_ARCHITECT_SUM_TOTAL {
            return Ok(AwardOutcome::NotAwardable);
        }
        let voters = self
            .ctx
            .vote_repo()
            .count_distinct_upvoters(EntityKind::Content, &content_ids, scope)
            .await?;
        if voters < TOPIC_ARCHITECT_DISTINCT_VOTERS {
            return Ok(AwardOutcome::NotAwardable);
        }
        let mut context = Map::new();
        context.insert("topic_id".into(), json!(topic_id));
        badges
            .award(creator_id, badge_codes::TOPIC_ARCHITECT, context)
            .await
    }
}
