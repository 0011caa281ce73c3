//! Entity <-> model mappers

mod badge;
mod user_badge;
mod vote;

pub use vote::target_from_columns;
