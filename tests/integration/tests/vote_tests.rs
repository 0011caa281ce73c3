//! Voting ledger and aggregate tests

use anyhow::Result;

use integration_tests::TestWorld;
use kudos_core::{Snowflake, VoteDirection};
use kudos_service::{ServiceError, VoteService};

fn user(id: i64) -> Snowflake {
    Snowflake::from(id)
}

#[tokio::test]
async fn test_first_vote_creates_and_counts() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    let response = votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;

    assert_eq!(response.value, 1);
    assert_eq!(response.total, 1);
    assert_eq!(response.status, "created");
    Ok(())
}

#[tokio::test]
async fn test_repeat_vote_toggles_off() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;
    let response = votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;

    assert_eq!(response.value, 0);
    assert_eq!(response.total, 0);
    assert_eq!(response.status, "removed");
    assert_eq!(votes.get_vote(Some(user(2)), target, None).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_opposite_direction_flips_in_one_call() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;
    let response = votes
        .cast_vote(user(2), target, None, VoteDirection::Down)
        .await?;

    assert_eq!(response.value, -1);
    assert_eq!(response.total, -1);
    assert_eq!(response.status, "changed");
    Ok(())
}

#[tokio::test]
async fn test_aggregate_matches_ledger_sum() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    for voter in [2, 3, 4] {
        votes
            .cast_vote(user(voter), target, None, VoteDirection::Up)
            .await?;
    }
    votes
        .cast_vote(user(5), target, None, VoteDirection::Down)
        .await?;

    assert_eq!(votes.get_count(target, None).await?, 2);
    let ratio = votes.positive_ratio(target, None).await?;
    assert!((ratio - 0.75).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn test_anonymous_reads() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;

    assert_eq!(votes.get_vote(None, target, None).await?, 0);
    assert_eq!(votes.get_count(target, None).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_remove_without_vote_is_unchanged() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    let response = votes.remove_vote(user(2), target, None).await?;

    assert_eq!(response.value, 0);
    assert_eq!(response.total, 0);
    assert_eq!(response.status, "unchanged");
    // A no-op removal is a read; it must not materialize an aggregate row.
    assert!(!world.backend.has_count_row(target, None));
    Ok(())
}

#[tokio::test]
async fn test_remove_after_vote() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Down)
        .await?;
    let response = votes.remove_vote(user(2), target, None).await?;

    assert_eq!(response.value, 0);
    assert_eq!(response.total, 0);
    assert_eq!(response.status, "removed");
    Ok(())
}

#[tokio::test]
async fn test_unknown_target_rejected() -> Result<()> {
    let world = TestWorld::new()?;
    let votes = VoteService::new(&world.ctx);
    let target = kudos_core::TargetRef::content(Snowflake::from(999));

    let result = votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_batch_vote_values() -> Result<()> {
    let world = TestWorld::new()?;
    let c1 = world.content(101, 1);
    let c2 = world.content(102, 1);
    let c3 = world.content(103, 1);
    let votes = VoteService::new(&world.ctx);

    votes.cast_vote(user(2), c1, None, VoteDirection::Up).await?;
    votes
        .cast_vote(user(2), c2, None, VoteDirection::Down)
        .await?;

    let ids = [c1.id, c2.id, c3.id];
    let values = votes
        .get_votes_for_targets(Some(user(2)), kudos_core::EntityKind::Content, &ids, None)
        .await?;
    assert_eq!(values, vec![(c1.id, 1), (c2.id, -1)]);

    let anonymous = votes
        .get_votes_for_targets(None, kudos_core::EntityKind::Content, &ids, None)
        .await?;
    assert!(anonymous.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_recompute_repairs_drift() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;
    votes
        .cast_vote(user(3), target, None, VoteDirection::Up)
        .await?;

    world.backend.corrupt_total(target, None, 42);
    assert_eq!(votes.get_count(target, None).await?, 42);

    let repaired = votes.recompute(target, None).await?;
    assert_eq!(repaired, 2);
    assert_eq!(votes.get_count(target, None).await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_recompute_on_untouched_pair_creates_no_row() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    assert_eq!(votes.recompute(target, None).await?, 0);
    assert!(!world.backend.has_count_row(target, None));
    Ok(())
}

#[tokio::test]
async fn test_scoped_and_global_totals_are_independent() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let topic = world.topic(500, 1, &[target]);
    let votes = VoteService::new(&world.ctx);

    votes
        .cast_vote(user(2), target, None, VoteDirection::Up)
        .await?;
    votes
        .cast_vote(user(3), target, Some(topic), VoteDirection::Up)
        .await?;

    assert_eq!(votes.get_count(target, None).await?, 1);
    assert_eq!(votes.get_count(target, Some(topic)).await?, 1);
    assert_eq!(votes.get_vote(Some(user(2)), target, Some(topic)).await?, 0);
    Ok(())
}
