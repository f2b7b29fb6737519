//! Materialized order state and its reducer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregate;

use super::{CustomerId, LineItem, OrderEvent, OrderId};

/// Current state of one order, derived by folding its events.
///
/// The default value is the zero state every rebuild starts from: empty
/// identifiers, no items and `created_at` at the Unix epoch. A rebuild of an
/// order that has no events yields exactly this value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    /// Order identifier, empty until an OrderPlaced event is folded.
    pub order_id: OrderId,

    /// Customer who placed the order.
    pub customer_id: CustomerId,

    /// Items in the order, in the order they were added.
    pub items: Vec<LineItem>,

    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

impl Aggregate for OrderState {
    type Event = OrderEvent;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            OrderEvent::OrderPlaced(data) => {
                self.order_id = data.order_id().clone();
                self.customer_id = data.customer_id().clone();
                self.created_at = data.created_at();
            }
            OrderEvent::ItemAdded(data) => {
                self.items
                    .push(LineItem::new(data.item_id().clone(), data.quantity()));
            }
        }
    }
}

// Query methods
impl OrderState {
    /// Returns true once an OrderPlaced event has been folded.
    pub fn exists(&self) -> bool {
        !self.order_id.is_blank()
    }

    /// Returns the number of item lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all line quantities.
    ///
    /// Summed as `i128` so that any mix of `i64` quantities fits.
    pub fn total_quantity(&self) -> i128 {
        self.items.iter().map(|item| i128::from(item.quantity)).sum()
    }
}
