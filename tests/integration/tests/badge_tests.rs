//! Badge awarding, rule engine, and dispatcher tests

use anyhow::Result;
use serde_json::Map;

use integration_tests::{inactive_badge, TestWorld};
use kudos_core::{badge_codes, DomainEvent, Snowflake, VoteDirection};
use kudos_service::{AwardOutcome, BadgeService, EventDispatcher, VoteService};

fn user(id: i64) -> Snowflake {
    Snowflake::from(id)
}

#[tokio::test]
async fn test_award_once() -> Result<()> {
    let world = TestWorld::new()?;
    let badges = BadgeService::new(&world.ctx);

    let first = badges
        .award(user(1), badge_codes::FIRST_COMMENT, Map::new())
        .await?;
    let second = badges
        .award(user(1), badge_codes::FIRST_COMMENT, Map::new())
        .await?;

    assert!(first.is_granted());
    assert_eq!(second, AwardOutcome::AlreadyHeld);
    assert_eq!(world.backend.badge_row_count(user(1)), 1);
    assert_eq!(badges.points(user(1)).await?, 5);
    Ok(())
}

#[tokio::test]
async fn test_unknown_and_inactive_codes_not_awardable() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.add_badge(inactive_badge(99, "retired_badge"));
    let badges = BadgeService::new(&world.ctx);

    let unknown = badges.award(user(1), "no_such_badge", Map::new()).await?;
    let retired = badges.award(user(1), "retired_badge", Map::new()).await?;

    assert_eq!(unknown, AwardOutcome::NotAwardable);
    assert_eq!(retired, AwardOutcome::NotAwardable);
    assert_eq!(world.backend.badge_row_count(user(1)), 0);
    assert!(!badges.has_badge(user(1), "no_such_badge").await?);
    assert!(!badges.is_active("retired_badge").await?);
    assert!(badges.is_active(badge_codes::FIRST_COMMENT).await?);

    let catalog = badges.catalog().await?;
    assert_eq!(catalog.len(), 11);
    let first_comment = catalog
        .iter()
        .find(|entry| entry.code == badge_codes::FIRST_COMMENT)
        .unwrap();
    assert_eq!(first_comment.points_value, 5);
    assert_eq!(first_comment.category, "engagement");
    Ok(())
}

#[tokio::test]
async fn test_concurrent_award_grants_exactly_once() -> Result<()> {
    let world = TestWorld::new()?;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ctx = world.ctx.clone();
        handles.push(tokio::spawn(async move {
            BadgeService::new(&ctx)
                .award(user(1), badge_codes::QUIZ_MASTER, Map::new())
                .await
        }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await??.is_granted() {
            granted += 1;
        }
    }

    assert_eq!(granted, 1);
    assert_eq!(world.backend.badge_row_count(user(1)), 1);
    assert_eq!(
        BadgeService::new(&world.ctx).points(user(1)).await?,
        50
    );
    Ok(())
}

#[tokio::test]
async fn test_first_comment_awarded_on_event() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_comment_count(user(1), 1);
    let dispatcher = EventDispatcher::new(&world.ctx);
    let event = DomainEvent::CommentCreated {
        author_id: user(1),
        comment_id: Snowflake::from(10),
    };

    dispatcher.dispatch(&event).await;
    dispatcher.dispatch(&event).await;

    let badges = BadgeService::new(&world.ctx);
    assert!(badges.has_badge(user(1), badge_codes::FIRST_COMMENT).await?);
    assert_eq!(world.backend.badge_row_count(user(1)), 1);
    Ok(())
}

#[tokio::test]
async fn test_first_comment_requires_exactly_one() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_comment_count(user(1), 2);

    EventDispatcher::new(&world.ctx)
        .dispatch(&DomainEvent::CommentCreated {
            author_id: user(1),
            comment_id: Snowflake::from(10),
        })
        .await;

    let badges = BadgeService::new(&world.ctx);
    assert!(!badges.has_badge(user(1), badge_codes::FIRST_COMMENT).await?);
    Ok(())
}

#[tokio::test]
async fn test_highly_rated_comment_fires_at_threshold() -> Result<()> {
    let world = TestWorld::new()?;
    let author = user(1);
    let comment = world.comment(10, 1);
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    // Four votes stay below the threshold.
    for voter in 2..=5 {
        votes
            .cast_vote(user(voter), comment, None, VoteDirection::Up)
            .await?;
    }
    assert!(
        !badges
            .has_badge(author, badge_codes::FIRST_HIGHLY_RATED_COMMENT)
            .await?
    );

    // The fifth vote reaches it on the triggering update.
    votes
        .cast_vote(user(6), comment, None, VoteDirection::Up)
        .await?;
    assert!(
        badges
            .has_badge(author, badge_codes::FIRST_HIGHLY_RATED_COMMENT)
            .await?
    );
    assert_eq!(badges.points(author).await?, 15);

    // A sixth vote does not re-fire.
    votes
        .cast_vote(user(7), comment, None, VoteDirection::Up)
        .await?;
    assert_eq!(world.backend.badge_row_count(author), 1);
    assert_eq!(badges.points(author).await?, 15);
    Ok(())
}

#[tokio::test]
async fn test_highly_rated_content_fires_at_threshold() -> Result<()> {
    let world = TestWorld::new()?;
    let author = user(1);
    let content = world.content(20, 1);
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    for voter in 2..=11 {
        votes
            .cast_vote(user(voter), content, None, VoteDirection::Up)
            .await?;
    }

    assert!(
        badges
            .has_badge(author, badge_codes::FIRST_HIGHLY_RATED_CONTENT)
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_community_voice_sums_over_all_comments() -> Result<()> {
    let world = TestWorld::new()?;
    let author = user(1);
    let comments: Vec<_> = (10..14).map(|id| world.comment(id, 1)).collect();
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    // 4 comments x 5 upvotes = 20 total, reached on the final vote.
    for &comment in &comments {
        for voter in 2..=6 {
            votes
                .cast_vote(user(voter), comment, None, VoteDirection::Up)
                .await?;
        }
    }

    assert!(badges.has_badge(author, badge_codes::COMMUNITY_VOICE).await?);
    Ok(())
}

#[tokio::test]
async fn test_content_creator_counts_rated_contents() -> Result<()> {
    let world = TestWorld::new()?;
    let author = user(1);
    let contents: Vec<_> = (20..23).map(|id| world.content(id, 1)).collect();
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    for &content in &contents {
        for voter in 2..=6 {
            votes
                .cast_vote(user(voter), content, None, VoteDirection::Up)
                .await?;
        }
    }

    assert!(badges.has_badge(author, badge_codes::CONTENT_CREATOR).await?);
    Ok(())
}

#[tokio::test]
async fn test_node_completion_awards_learning_badges() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_completed_nodes(user(1), 20);
    world.backend.set_completed_paths(user(1), 1);

    EventDispatcher::new(&world.ctx)
        .dispatch(&DomainEvent::NodeCompleted {
            user_id: user(1),
            knowledge_path_id: Snowflake::from(30),
            path_completed: true,
        })
        .await;

    let badges = BadgeService::new(&world.ctx);
    assert!(badges.has_badge(user(1), badge_codes::KNOWLEDGE_SEEKER).await?);
    assert!(
        badges
            .has_badge(user(1), badge_codes::FIRST_KNOWLEDGE_PATH_COMPLETED)
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_path_completion_badge_requires_full_path() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_completed_nodes(user(1), 3);

    EventDispatcher::new(&world.ctx)
        .dispatch(&DomainEvent::NodeCompleted {
            user_id: user(1),
            knowledge_path_id: Snowflake::from(30),
            path_completed: false,
        })
        .await;

    let badges = BadgeService::new(&world.ctx);
    assert!(
        !badges
            .has_badge(user(1), badge_codes::FIRST_KNOWLEDGE_PATH_COMPLETED)
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_path_created_needs_two_nodes() -> Result<()> {
    let world = TestWorld::new()?;
    let dispatcher = EventDispatcher::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    dispatcher
        .dispatch(&DomainEvent::NodeCreated {
            author_id: user(1),
            knowledge_path_id: Snowflake::from(30),
            node_count: 1,
        })
        .await;
    assert!(
        !badges
            .has_badge(user(1), badge_codes::FIRST_KNOWLEDGE_PATH_CREATED)
            .await?
    );

    dispatcher
        .dispatch(&DomainEvent::NodeCreated {
            author_id: user(1),
            knowledge_path_id: Snowflake::from(30),
            node_count: 2,
        })
        .await;
    assert!(
        badges
            .has_badge(user(1), badge_codes::FIRST_KNOWLEDGE_PATH_CREATED)
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_quiz_master_needs_five_perfect_scores() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_perfect_quizzes(user(1), 5);

    EventDispatcher::new(&world.ctx)
        .dispatch(&DomainEvent::QuizAttemptRecorded {
            user_id: user(1),
            quiz_id: Snowflake::from(40),
            perfect_score: true,
        })
        .await;

    let badges = BadgeService::new(&world.ctx);
    assert!(badges.has_badge(user(1), badge_codes::QUIZ_MASTER).await?);
    Ok(())
}

#[tokio::test]
async fn test_imperfect_attempt_does_not_trigger_quiz_master() -> Result<()> {
    let world = TestWorld::new()?;
    world.backend.set_perfect_quizzes(user(1), 5);

    EventDispatcher::new(&world.ctx)
        .dispatch(&DomainEvent::QuizAttemptRecorded {
            user_id: user(1),
            quiz_id: Snowflake::from(40),
            perfect_score: false,
        })
        .await;

    let badges = BadgeService::new(&world.ctx);
    assert!(!badges.has_badge(user(1), badge_codes::QUIZ_MASTER).await?);
    Ok(())
}

#[tokio::test]
async fn test_topic_curator_scenario() -> Result<()> {
    let world = TestWorld::new()?;
    let creator = user(1);
    let contents: Vec<_> = (20..25).map(|id| world.content(id, 1)).collect();
    let topic = world.topic(500, 1, &contents);
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    votes
        .cast_vote(user(2), contents[0], Some(topic), VoteDirection::Up)
        .await?;
    assert!(!badges.has_badge(creator, badge_codes::TOPIC_CURATOR).await?);

    votes
        .cast_vote(user(2), contents[1], Some(topic), VoteDirection::Up)
        .await?;
    assert!(badges.has_badge(creator, badge_codes::TOPIC_CURATOR).await?);
    Ok(())
}

#[tokio::test]
async fn test_topic_architect_scenario() -> Result<()> {
    let world = TestWorld::new()?;
    let creator = user(1);
    let contents: Vec<_> = (20..30).map(|id| world.content(id, 1)).collect();
    let topic = world.topic(500, 1, &contents);
    let votes = VoteService::new(&world.ctx);
    let badges = BadgeService::new(&world.ctx);

    // 5 distinct voters upvote all 10 contents: each content at 5,
    // sum 50, 5 distinct voters.
    for voter in 2..=6 {
        for &content in &contents {
            votes
                .cast_vote(user(voter), content, Some(topic), VoteDirection::Up)
                .await?;
        }
    }
    assert!(badges.has_badge(creator, badge_codes::TOPIC_ARCHITECT).await?);
    let rows_after_award = world.backend.badge_row_count(creator);

    // Dropping distinct voters below the threshold neither revokes nor
    // re-triggers the badge.
    votes.remove_vote(user(6), contents[0], Some(topic)).await?;
    assert!(badges.has_badge(creator, badge_codes::TOPIC_ARCHITECT).await?);
    assert_eq!(world.backend.badge_row_count(creator), rows_after_award);
    Ok(())
}

#[tokio::test]
async fn test_vote_succeeds_when_topic_rules_cannot_resolve() -> Result<()> {
    let world = TestWorld::new()?;
    let target = world.content(100, 1);
    let votes = VoteService::new(&world.ctx);

    // Scope points at a topic nobody registered; the topic rules bail out
    // and the vote itself still lands.
    let response = votes
        .cast_vote(user(2), target, Some(Snowflake::from(777)), VoteDirection::Up)
        .await?;

    assert_eq!(response.total, 1);
    Ok(())
}

#[tokio::test]
async fn test_failing_rule_does_not_abort_vote_or_later_rules() -> Result<()> {
    let world = TestWorld::with_failing_topics()?;
    let comment = world.comment(100, 1);
    let votes = VoteService::new(&world.ctx);
    let topic = Snowflake::from(777);

    // Every scoped vote dispatches the topic rules first, and against this
    // backend they error. The vote must still commit, and the comment rules
    // later in the same dispatch must still run.
    for voter in 10..15 {
        let response = votes
            .cast_vote(user(voter), comment, Some(topic), VoteDirection::Up)
            .await?;
        assert_eq!(response.status, "created");
    }

    assert_eq!(votes.get_count(comment, Some(topic)).await?, 5);
    let badges = BadgeService::new(&world.ctx);
    assert!(
        badges
            .has_badge(user(1), badge_codes::FIRST_HIGHLY_RATED_COMMENT)
            .await?
    );
    assert_eq!(world.backend.badge_row_count(user(1)), 1);
    Ok(())
}

#[tokio::test]
async fn test_profile_badges_read_api() -> Result<()> {
    let world = TestWorld::new()?;
    let badges = BadgeService::new(&world.ctx);

    badges
        .award(user(1), badge_codes::FIRST_COMMENT, Map::new())
        .await?;
    badges
        .award(user(1), badge_codes::QUIZ_MASTER, Map::new())
        .await?;

    let profile = badges.badges_for(user(1)).await?;
    assert_eq!(profile.badges.len(), 2);
    assert_eq!(profile.total_points, 55);
    assert_eq!(badges.points(user(1)).await?, 55);
    Ok(())
}
