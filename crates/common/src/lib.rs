//! Shared types used across the event log and the domain layer.

pub mod types;

pub use types::AggregateId;
