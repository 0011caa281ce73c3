//! PostgreSQL implementation of UserBadgeRepository
//!
//! Award + points credit in one transaction; the (user_id, badge_id) unique
//! constraint arbitrates racing triggers.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

use kudos_core::entities::UserBadge;
use kudos_core::traits::{RepoResult, UserBadgeRepository};
use kudos_core::value_objects::Snowflake;

use crate::models::UserBadgeModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserBadgeRepository
#[derive(Clone)]
pub struct PgUserBadgeRepository {
    pool: PgPool,
}

impl PgUserBadgeRepository {
    /// Create a new PgUserBadgeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserBadgeRepository for PgUserBadgeRepository {
    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, badge_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_badges WHERE user_id = $1 AND badge_id = $2
            )
            "#,
        )
        .bind(user_id.into_inner())
        .bind(badge_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, user_badge), fields(user_id = %user_badge.user_id, badge_id = %user_badge.badge_id))]
    async fn award(&self, user_badge: &UserBadge) -> RepoResult<Option<UserBadge>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_badges (id, user_id, badge_id, points_earned, context, earned_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, badge_id) DO NOTHING
            "#,
        )
        .bind(user_badge.id.into_inner())
        .bind(user_badge.user_id.into_inner())
        .bind(user_badge.badge_id.into_inner())
        .bind(user_badge.points_earned)
        .bind(Value::Object(user_badge.context.clone()))
        .bind(user_badge.earned_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if inserted.rows_affected() == 0 {
            // Lost the race (or manual re-grant): already awarded, no points
            return Ok(None);
        }

        // Credit the profile counter in the same transaction as the award
        sqlx::query(
            r#"
            INSERT INTO profile_points (user_id, points)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET points = profile_points.points + EXCLUDED.points
            "#,
        )
        .bind(user_badge.user_id.into_inner())
        .bind(i64::from(user_badge.points_earned))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(user_badge.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<UserBadge>> {
        let results = sqlx::query_as::<_, UserBadgeModel>(
            r#"
            SELECT id, user_id, badge_id, points_earned, context, earned_at
            FROM user_badges
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserBadge::from).collect())
    }

    #[instrument(skip(self))]
    async fn points(&self, user_id: Snowflake) -> RepoResult<i64> {
        let points = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT points FROM profile_points WHERE user_id = $1
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(points.unwrap_or(0))
    }
}
