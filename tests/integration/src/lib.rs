//! Integration test utilities for the voting ledger and badge engine
//!
//! Provides an in-memory backend implementing the repository and lookup
//! traits, plus helpers for wiring a `ServiceContext` around it.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
