//! Order replay walkthrough.
//!
//! Places one order, adds two items to it through an in-memory event log and
//! rebuilds the order state from the recorded events.

pub mod config;
pub mod error;

use domain::{OrderAggregate, OrderEvent, OrderState};
use event_store::{InMemoryEventLog, TracingObserver};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use config::{Config, LogFormat};
pub use error::AppError;

/// Items added by the walkthrough, in order.
pub const DEMO_ITEMS: [(&str, i64); 2] = [("item-789", 2), ("item-101", 5)];

/// Installs the global tracing subscriber. Log lines go to stderr.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Runs the walkthrough against a fresh log and returns the rebuilt state.
#[tracing::instrument(skip(config), fields(order_id = %config.order_id))]
pub fn run(config: &Config) -> Result<OrderState, AppError> {
    let log = InMemoryEventLog::<OrderEvent>::new().with_observer(TracingObserver);
    let mut order = OrderAggregate::new(log);

    order.place_order(&config.order_id, &config.customer_id)?;
    for (item_id, quantity) in DEMO_ITEMS {
        order.add_item(&config.order_id, item_id, quantity)?;
    }

    let state = order.rebuild_state(&config.order_id).clone();
    tracing::info!(
        items = state.item_count(),
        total_quantity = %state.total_quantity(),
        "order state rebuilt"
    );
    Ok(state)
}

/// Renders a rebuilt state as pretty-printed JSON.
pub fn render(state: &OrderState) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(state)?)
}
