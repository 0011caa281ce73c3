//! # kudos-db
//!
//! Database layer implementing the repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `kudos-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations (ledger, aggregate, catalog, awards)
//! - SQL migrations (schema + badge seed data, under `migrations/`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kudos_db::pool::{create_pool, DatabaseConfig};
//! use kudos_db::repositories::PgVoteRepository;
//! use kudos_core::traits::VoteRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let vote_repo = PgVoteRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgBadgeRepository, PgUserBadgeRepository, PgVoteCountRepository, PgVoteRepository,
};
