//! PostgreSQL implementation of VoteCountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use kudos_core::traits::{RepoResult, VoteCountRepository};
use kudos_core::value_objects::{EntityKind, Scope, Snowflake, TargetRef};

use crate::models::VoteRatioModel;

use super::error::map_db_error;

/// Get-or-create the aggregate row and add `delta`, returning the new total.
///
/// Generic over the executor so the ledger repository can run it inside the
/// same transaction as its vote upsert, while standalone repair calls run it
/// directly on the pool.
pub(crate) async fn apply_delta_on<'e, E>(
    executor: E,
    target: TargetRef,
    scope: Scope,
    delta: i64,
) -> Result<i64, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO vote_counts (target_kind, target_id, scope, total)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (target_kind, target_id, COALESCE(scope, 0))
        DO UPDATE SET total = vote_counts.total + EXCLUDED.total
        RETURNING total
        "#,
    )
    .bind(target.kind.as_i16())
    .bind(target.id.into_inner())
    .bind(scope.map(Snowflake::into_inner))
    .bind(delta)
    .fetch_one(executor)
    .await
}

/// PostgreSQL implementation of VoteCountRepository
#[derive(Clone)]
pub struct PgVoteCountRepository {
    pool: PgPool,
}

impl PgVoteCountRepository {
    /// Create a new PgVoteCountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteCountRepository for PgVoteCountRepository {
    #[instrument(skip(self))]
    async fn total(&self, target: TargetRef, scope: Scope) -> RepoResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT total
            FROM vote_counts
            WHERE target_kind = $1 AND target_id = $2 AND scope IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(total.unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn apply_delta(&self, target: TargetRef, scope: Scope, delta: i64) -> RepoResult<i64> {
        apply_delta_on(&self.pool, target, scope, delta)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn recompute(&self, target: TargetRef, scope: Scope) -> RepoResult<i64> {
        // Only pairs with ledger entries get a row; recompute on a clean
        // pair must not materialize one.
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            WITH ledger AS (
                SELECT COUNT(*) AS entries, COALESCE(SUM(value), 0)::bigint AS total
                FROM votes
                WHERE target_kind = $1 AND target_id = $2 AND scope IS NOT DISTINCT FROM $3
            ), upserted AS (
                INSERT INTO vote_counts (target_kind, target_id, scope, total)
                SELECT $1::smallint, $2::bigint, $3::bigint, ledger.total
                FROM ledger
                WHERE ledger.entries > 0
                ON CONFLICT (target_kind, target_id, COALESCE(scope, 0))
                DO UPDATE SET total = EXCLUDED.total
                RETURNING total
            )
            SELECT total FROM ledger
            "#,
        )
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn positive_ratio(&self, target: TargetRef, scope: Scope) -> RepoResult<f64> {
        let ratio = sqlx::query_as::<_, VoteRatioModel>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE value > 0)  AS positive,
                COUNT(*) FILTER (WHERE value <> 0) AS active
            FROM votes
            WHERE target_kind = $1 AND target_id = $2 AND scope IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if ratio.active == 0 {
            Ok(0.0)
        } else {
            Ok(ratio.positive as f64 / ratio.active as f64)
        }
    }

    #[instrument(skip(self, ids))]
    async fn sum_totals(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<i64> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(Snowflake::into_inner).collect();

        let sum = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(total), 0)
            FROM vote_counts
            WHERE target_kind = $1 AND target_id = ANY($2) AND scope IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(kind.as_i16())
        .bind(&raw_ids)
        .bind(scope.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(sum)
    }

    #[instrument(skip(self, ids))]
    async fn count_at_least(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
        threshold: i64,
    ) -> RepoResult<i64> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(Snowflake::into_inner).collect();

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM vote_counts
            WHERE target_kind = $1 AND target_id = ANY($2)
              AND scope IS NOT DISTINCT FROM $3 AND total >= $4
            "#,
        )
        .bind(kind.as_i16())
        .bind(&raw_ids)
        .bind(scope.map(Snowflake::into_inner))
        .bind(threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
