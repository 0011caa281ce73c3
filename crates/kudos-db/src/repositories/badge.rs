//! PostgreSQL implementation of BadgeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use kudos_core::entities::Badge;
use kudos_core::traits::{BadgeRepository, RepoResult};

use crate::models::BadgeModel;

use super::error::map_db_error;

/// PostgreSQL implementation of BadgeRepository
///
/// The catalog is read-mostly: seeded by migration, mutated only by
/// administrative tooling outside this crate.
#[derive(Clone)]
pub struct PgBadgeRepository {
    pool: PgPool,
}

impl PgBadgeRepository {
    /// Create a new PgBadgeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeRepository for PgBadgeRepository {
    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Badge>> {
        let result = sqlx::query_as::<_, BadgeModel>(
            r#"
            SELECT id, code, name, description, category, points_value, is_active, created_at
            FROM badges
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Badge::from))
    }

    #[instrument(skip(self))]
    async fn find_all_active(&self) -> RepoResult<Vec<Badge>> {
        let results = sqlx::query_as::<_, BadgeModel>(
            r#"
            SELECT id, code, name, description, category, points_value, is_active, created_at
            FROM badges
            WHERE is_active = TRUE
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Badge::from).collect())
    }
}
