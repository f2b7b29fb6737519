//! Order aggregate: the intent and query surface over one event log.

use event_store::{EventLog, Sequence};

use crate::error::ValidationError;
use crate::replay::ReplayEngine;

use super::{OrderEvent, OrderId, OrderState};

/// Order aggregate root.
///
/// Intent methods validate and append events; they never change the
/// materialized state. The state only changes through `rebuild_state`.
pub struct OrderAggregate<L: EventLog<OrderEvent>> {
    engine: ReplayEngine<L, OrderState>,
}

impl<L: EventLog<OrderEvent>> OrderAggregate<L> {
    /// Creates an order aggregate bound to the given log.
    pub fn new(log: L) -> Self {
        Self {
            engine: ReplayEngine::new(log),
        }
    }

    /// Returns a reference to the underlying log.
    pub fn log(&self) -> &L {
        self.engine.log()
    }

    /// Places an order for a customer, stamped with the current time.
    #[tracing::instrument(skip(self))]
    pub fn place_order(
        &self,
        order_id: &str,
        customer_id: &str,
    ) -> Result<Sequence, ValidationError> {
        let event = OrderEvent::order_placed(order_id, customer_id)?;
        let sequence = self.engine.issue(event);
        tracing::info!(%sequence, "order placed");
        Ok(sequence)
    }

    /// Adds an item to an order.
    ///
    /// The order does not have to be placed first; consistency is left to
    /// whoever reads the rebuilt state.
    #[tracing::instrument(skip(self))]
    pub fn add_item(
        &self,
        order_id: &str,
        item_id: &str,
        quantity: i64,
    ) -> Result<Sequence, ValidationError> {
        let event = OrderEvent::item_added(order_id, item_id, quantity)?;
        let sequence = self.engine.issue(event);
        tracing::info!(%sequence, "item added");
        Ok(sequence)
    }

    /// Rebuilds the state of an order from its events and makes it current.
    ///
    /// An order with no events rebuilds to `OrderState::default()`.
    #[tracing::instrument(skip(self))]
    pub fn rebuild_state(&mut self, order_id: &str) -> &OrderState {
        self.engine.rebuild(&OrderId::new(order_id))
    }

    /// Folds the events of an order without changing the current state.
    pub fn load(&self, order_id: &str) -> OrderState {
        self.engine.load(&OrderId::new(order_id))
    }

    /// Returns the last rebuilt state, or `None` before the first rebuild.
    pub fn state(&self) -> Option<&OrderState> {
        self.engine.state()
    }
}
