//! Event dispatcher
//!
//! Routes domain events to the badge rules that care about them. Every rule
//! invocation is individually guarded: a failing rule is logged and the rest
//! still run, and the triggering operation never sees the failure. Ledger and
//! aggregate writes have already committed by the time an event reaches this
//! point.

use tracing::{instrument, warn};

use kudos_core::events::DomainEvent;
use kudos_core::value_objects::EntityKind;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::rules::RuleEngine;

/// Event dispatcher
pub struct EventDispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventDispatcher<'a> {
    /// Create a new EventDispatcher
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run every rule the event can satisfy. Infallible by contract: rule
    /// errors are logged and swallowed here.
    #[instrument(skip(self, event), fields(event = event.name()))]
    pub async fn dispatch(&self, event: &DomainEvent) {
        let rules = RuleEngine::new(self.ctx);

        match *event {
            DomainEvent::VoteCountUpdated { target, scope, .. } => {
                // Topic-scoped votes feed the topic rules first, then the
                // per-kind rules for the voted entity itself.
                if let Some(topic_id) = scope {
                    Self::guard("topic_curator", rules.check_topic_curator(topic_id).await);
                    Self::guard(
                        "topic_architect",
                        rules.check_topic_architect(topic_id).await,
                    );
                }
                match target.kind {
                    EntityKind::Comment => {
                        Self::guard(
                            "first_highly_rated_comment",
                            rules.check_first_highly_rated_comment(target, scope).await,
                        );
                        Self::guard(
                            "community_voice",
                            rules.check_community_voice(target, scope).await,
                        );
                    }
                    EntityKind::Content => {
                        Self::guard(
                            "first_highly_rated_content",
                            rules.check_first_highly_rated_content(target, scope).await,
                        );
                        Self::guard(
                            "content_creator",
                            rules.check_content_creator(target, scope).await,
                        );
                    }
                    _ => {}
                }
            }
            DomainEvent::CommentCreated { author_id, .. } => {
                Self::guard("first_comment", rules.check_first_comment(author_id).await);
            }
            DomainEvent::NodeCompleted {
                user_id,
                knowledge_path_id,
                path_completed,
            } => {
                Self::guard(
                    "knowledge_seeker",
                    rules.check_knowledge_seeker(user_id).await,
                );
                if path_completed {
                    Self::guard(
                        "first_knowledge_path_completed",
                        rules
                            .check_first_path_completed(user_id, knowledge_path_id)
                            .await,
                    );
                }
            }
            DomainEvent::NodeCreated {
                author_id,
                knowledge_path_id,
                node_count,
            } => {
                Self::guard(
                    "first_knowledge_path_created",
                    rules
                        .check_first_path_created(author_id, knowledge_path_id, node_count)
                        .await,
                );
            }
            DomainEvent::QuizAttemptRecorded {
                user_id,
                perfect_score,
                ..
            } => {
                if perfect_score {
                    Self::guard("quiz_master", rules.check_quiz_master(user_id).await);
                }
            }
        }
    }

    fn guard<T>(rule: &str, result: ServiceResult<T>) {
        if let Err(error) = result {
            warn!(rule, error = %error, "Badge rule check failed");
        }
    }
}
