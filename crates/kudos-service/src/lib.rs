//! # kudos-service
//!
//! Application layer containing the voting service, badge service, the badge
//! rule engine, and the event dispatcher that wires triggers to rules.

pub mod dto;
pub mod services;

pub use services::{
    AwardOutcome, BadgeService, EventDispatcher, RuleEngine, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, VoteService,
};
