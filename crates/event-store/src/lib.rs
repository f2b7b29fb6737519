pub mod error;
pub mod event;
pub mod memory;
pub mod observer;
pub mod query;
pub mod store;

pub use common::AggregateId;
pub use error::{EventLogError, Result};
pub use event::{DomainEvent, EventEnvelope, EventId, Sequence};
pub use memory::InMemoryEventLog;
pub use observer::{AppendObserver, TracingObserver};
pub use query::EventQuery;
pub use store::{EventLog, EventLogExt};
