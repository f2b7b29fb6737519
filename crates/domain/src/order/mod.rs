//! Order aggregate and related types.

mod aggregate;
mod events;
mod state;
mod value_objects;

pub use aggregate::OrderAggregate;
pub use events::{ItemAddedData, OrderEvent, OrderPlacedData};
pub use state::OrderState;
pub use value_objects::{CustomerId, ItemId, LineItem, OrderId};
