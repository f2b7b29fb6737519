//! Order domain events.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::error::{ValidationError, require};

use super::{CustomerId, ItemId, OrderId};

/// Events that can occur on an order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was placed by a customer.
    OrderPlaced(OrderPlacedData),

    /// Item was added to an order.
    ItemAdded(ItemAddedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "OrderPlaced",
            OrderEvent::ItemAdded(_) => "ItemAdded",
        }
    }

    fn correlation_key(&self) -> Option<&AggregateId> {
        Some(self.order_id())
    }
}

/// Data for OrderPlaced event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacedData {
    order_id: OrderId,
    customer_id: CustomerId,
    created_at: DateTime<Utc>,
}

impl OrderPlacedData {
    /// The order that was placed.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The customer who placed it.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// When the order was placed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Data for ItemAdded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAddedData {
    order_id: OrderId,
    item_id: ItemId,
    quantity: i64,
}

impl ItemAddedData {
    /// The order the item was added to.
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The item that was added.
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Quantity added.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

// Validating constructors; a blank identifier never becomes an event
impl OrderEvent {
    /// Creates an OrderPlaced event stamped with the current time.
    pub fn order_placed(
        order_id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
    ) -> Result<Self, ValidationError> {
        Self::order_placed_at(order_id, customer_id, Utc::now())
    }

    /// Creates an OrderPlaced event with an explicit creation time.
    pub fn order_placed_at(
        order_id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let order_id = order_id.into();
        let customer_id = customer_id.into();
        require("order_id", order_id.as_str())?;
        require("customer_id", customer_id.as_str())?;

        Ok(OrderEvent::OrderPlaced(OrderPlacedData {
            order_id,
            customer_id,
            created_at,
        }))
    }

    /// Creates an ItemAdded event.
    ///
    /// Does not check that the order exists or that the quantity is positive.
    pub fn item_added(
        order_id: impl Into<OrderId>,
        item_id: impl Into<ItemId>,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let order_id = order_id.into();
        let item_id = item_id.into();
        require("order_id", order_id.as_str())?;
        require("item_id", item_id.as_str())?;

        Ok(OrderEvent::ItemAdded(ItemAddedData {
            order_id,
            item_id,
            quantity,
        }))
    }

    /// Returns the order this event belongs to.
    pub fn order_id(&self) -> &OrderId {
        match self {
            OrderEvent::OrderPlaced(data) => &data.order_id,
            OrderEvent::ItemAdded(data) => &data.order_id,
        }
    }
}
