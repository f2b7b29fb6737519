//! Domain layer for the order replay core.
//!
//! This crate provides:
//! - Aggregate trait for event-sourced entities
//! - ReplayEngine, which issues events into a log and rebuilds state from it
//! - The order domain: events, materialized state and the order aggregate

pub mod aggregate;
pub mod error;
pub mod order;
pub mod replay;

pub use aggregate::{Aggregate, DomainEvent};
pub use error::ValidationError;
pub use order::{
    CustomerId, ItemAddedData, ItemId, LineItem, OrderAggregate, OrderEvent, OrderId,
    OrderPlacedData, OrderState,
};
pub use replay::ReplayEngine;
