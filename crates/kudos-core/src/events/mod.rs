//! Domain events - triggers consumed by the badge rule engine

mod domain_event;

pub use domain_event::DomainEvent;
