//! Badge service
//!
//! Award path for the rule engine: catalog lookup, duplicate checks, and the
//! atomic grant-plus-points write. All award paths are idempotent per
//! (user, badge); losing an award race reports `AlreadyHeld`, not an error.

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use kudos_core::entities::UserBadge;
use kudos_core::value_objects::Snowflake;

use crate::dto::{BadgeResponse, ProfileBadgesResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of an award attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AwardOutcome {
    /// The badge was granted to the user by this call
    Granted(UserBadge),
    /// The user already held the badge (including losing an award race)
    AlreadyHeld,
    /// The badge is unknown or retired from the catalog
    NotAwardable,
}

impl AwardOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Badge service
pub struct BadgeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BadgeService<'a> {
    /// Create a new BadgeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant a badge to a user by catalog code
    ///
    /// Unknown or inactive codes degrade to `NotAwardable` with a warning
    /// rather than an error: a retired badge must not break the rule that
    /// still references it.
    #[instrument(skip(self, context))]
    pub async fn award(
        &self,
        user_id: Snowflake,
        code: &str,
        context: Map<String, Value>,
    ) -> ServiceResult<AwardOutcome> {
        let Some(badge) = self.ctx.badge_repo().find_by_code(code).await? else {
            warn!(code, "Badge code not found in catalog");
            return Ok(AwardOutcome::NotAwardable);
        };

        if !badge.is_awardable() {
            warn!(code, badge_id = %badge.id, "Badge is not awardable");
            return Ok(AwardOutcome::NotAwardable);
        }

        if self.ctx.user_badge_repo().exists(user_id, badge.id).await? {
            return Ok(AwardOutcome::AlreadyHeld);
        }

        let earned = UserBadge::award(self.ctx.generate_id(), user_id, &badge, context);

        match self.ctx.user_badge_repo().award(&earned).await? {
            Some(awarded) => {
                info!(
                    user_id = %user_id,
                    code,
                    points = awarded.points_earned,
                    "Badge awarded"
                );
                Ok(AwardOutcome::Granted(awarded))
            }
            // Concurrent awarder won the insert between our exists() check
            // and the write.
            None => Ok(AwardOutcome::AlreadyHeld),
        }
    }

    /// Whether the user already holds the badge with this code.
    /// Unknown codes read as not held.
    #[instrument(skip(self))]
    pub async fn has_badge(&self, user_id: Snowflake, code: &str) -> ServiceResult<bool> {
        let Some(badge) = self.ctx.badge_repo().find_by_code(code).await? else {
            return Ok(false);
        };
        Ok(self.ctx.user_badge_repo().exists(user_id, badge.id).await?)
    }

    /// Whether this catalog code currently exists and is awardable
    #[instrument(skip(self))]
    pub async fn is_active(&self, code: &str) -> ServiceResult<bool> {
        let badge = self.ctx.badge_repo().find_by_code(code).await?;
        Ok(badge.is_some_and(|b| b.is_awardable()))
    }

    /// All active badges in the catalog
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> ServiceResult<Vec<BadgeResponse>> {
        let badges = self.ctx.badge_repo().find_all_active().await?;
        Ok(badges.iter().map(BadgeResponse::from).collect())
    }

    /// Badges a user has earned, newest first, with their points total
    #[instrument(skip(self))]
    pub async fn badges_for(&self, user_id: Snowflake) -> ServiceResult<ProfileBadgesResponse> {
        let earned = self.ctx.user_badge_repo().find_by_user(user_id).await?;
        let total_points = self.ctx.user_badge_repo().points(user_id).await?;
        Ok(ProfileBadgesResponse::new(&earned, total_points))
    }

    /// The user's accumulated badge points
    #[instrument(skip(self))]
    pub async fn points(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.user_badge_repo().points(user_id).await?)
    }
}
