//! PostgreSQL implementation of VoteRepository
//!
//! The toggle is a read-modify-write over the ledger row plus a delta applied
//! to the aggregate; both run in one transaction so the `total == Σ value`
//! invariant holds at every commit boundary.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use kudos_core::entities::{Vote, VoteOutcome};
use kudos_core::traits::{RepoResult, VoteRepository};
use kudos_core::value_objects::{
    toggle_vote, EntityKind, Scope, Snowflake, TargetRef, VoteDirection, VOTE_NONE,
};

use crate::models::VoteModel;

use super::error::map_db_error;
use super::vote_count::apply_delta_on;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Serialize same-user toggles on one (target, scope).
    ///
    /// An advisory xact lock rather than `SELECT ... FOR UPDATE`: it also
    /// covers the first-vote case where there is no row to lock yet, so two
    /// concurrent first votes cannot both insert-and-count.
    async fn lock_vote_slot(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> Result<(), sqlx::Error> {
        let key = format!(
            "vote:{}:{}:{}:{}",
            user_id,
            target.kind.as_i16(),
            target.id,
            scope.map_or(0, Snowflake::into_inner)
        );
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(key)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn current_value(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> Result<i16, sqlx::Error> {
        let value = sqlx::query_scalar::<_, i16>(
            r#"
            SELECT value
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
              AND scope IS NOT DISTINCT FROM $4
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .fetch_optional(&mut **tx)
        .await?;

        Ok(value.unwrap_or(VOTE_NONE))
    }

    async fn upsert_value(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        value: i16,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO votes (user_id, target_kind, target_id, scope, value, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id, target_kind, target_id, COALESCE(scope, 0))
            DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .bind(value)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Apply a transition from `current` to `next` and commit
    async fn apply_transition(
        &self,
        mut tx: Transaction<'_, Postgres>,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        current: i16,
        next: i16,
    ) -> RepoResult<VoteOutcome> {
        Self::upsert_value(&mut tx, user_id, target, scope, next)
            .await
            .map_err(map_db_error)?;

        let delta = i64::from(next) - i64::from(current);
        let total = apply_delta_on(&mut *tx, target, scope, delta)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(VoteOutcome::new(current, next, total))
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn cast(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
        direction: VoteDirection,
    ) -> RepoResult<VoteOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_vote_slot(&mut tx, user_id, target, scope)
            .await
            .map_err(map_db_error)?;
        let current = Self::current_value(&mut tx, user_id, target, scope)
            .await
            .map_err(map_db_error)?;

        let next = toggle_vote(current, direction);
        self.apply_transition(tx, user_id, target, scope, current, next)
            .await
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> RepoResult<VoteOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_vote_slot(&mut tx, user_id, target, scope)
            .await
            .map_err(map_db_error)?;
        let current = Self::current_value(&mut tx, user_id, target, scope)
            .await
            .map_err(map_db_error)?;

        if current == VOTE_NONE {
            // Nothing to withdraw; report the untouched total without
            // materializing an aggregate row
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
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .unwrap_or(0);
            tx.commit().await.map_err(map_db_error)?;
            return Ok(VoteOutcome::new(current, current, total));
        }

        self.apply_transition(tx, user_id, target, scope, current, VOTE_NONE)
            .await
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: Snowflake,
        target: TargetRef,
        scope: Scope,
    ) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT user_id, target_kind, target_id, scope, value, created_at
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = $3
              AND scope IS NOT DISTINCT FROM $4
            "#,
        )
        .bind(user_id.into_inner())
        .bind(target.kind.as_i16())
        .bind(target.id.into_inner())
        .bind(scope.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self, ids))]
    async fn find_values(
        &self,
        user_id: Snowflake,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<Vec<(Snowflake, i16)>> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(Snowflake::into_inner).collect();

        let rows = sqlx::query_as::<_, (i64, i16)>(
            r#"
            SELECT target_id, value
            FROM votes
            WHERE user_id = $1 AND target_kind = $2 AND target_id = ANY($3)
              AND scope IS NOT DISTINCT FROM $4 AND value <> 0
            "#,
        )
        .bind(user_id.into_inner())
        .bind(kind.as_i16())
        .bind(&raw_ids)
        .bind(scope.map(Snowflake::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, value)| (Snowflake::new(id), value))
            .collect())
    }

    #[instrument(skip(self, ids))]
    async fn count_distinct_upvoters(
        &self,
        kind: EntityKind,
        ids: &[Snowflake],
        scope: Scope,
    ) -> RepoResult<i64> {
        let raw_ids: Vec<i64> = ids.iter().copied().map(Snowflake::into_inner).collect();

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT user_id)
            FROM votes
            WHERE target_kind = $1 AND target_id = ANY($2)
              AND scope IS NOT DISTINCT FROM $3 AND value > 0
            "#,
        )
        .bind(kind.as_i16())
        .bind(&raw_ids)
        .bind(scope.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
