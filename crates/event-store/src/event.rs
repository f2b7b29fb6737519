use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AggregateId, Result};

/// Trait for events stored in the log.
///
/// Events are immutable facts, named in past tense. Each one reports the
/// aggregate it belongs to so the log can filter by identity.
pub trait DomainEvent: Clone + Send + Sync + 'static {
    /// Returns the event type name, used for filtering and diagnostics.
    fn event_type(&self) -> &'static str;

    /// Returns the correlation key of the aggregate this event belongs to.
    ///
    /// Events that return `None` are never part of any aggregate's stream.
    fn correlation_key(&self) -> Option<&AggregateId>;
}

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Position of an event in the log.
///
/// The first appended event gets sequence 1 and every append after it gets
/// the next value. Sequence 0 means "nothing appended yet".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Sequence(u64);

impl Sequence {
    /// Creates a sequence from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the position before any event (0).
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the position of the first event (1).
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next position.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw sequence value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Sequence {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A stored event together with the metadata the log assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// Position of the event in the log.
    pub sequence: Sequence,

    /// When the event was appended.
    pub recorded_at: DateTime<Utc>,

    /// The event itself.
    pub event: E,
}

impl<E: DomainEvent> EventEnvelope<E> {
    /// Wraps an event at the given position, stamped with the current time.
    pub fn new(sequence: Sequence, event: E) -> Self {
        Self {
            event_id: EventId::new(),
            sequence,
            recorded_at: Utc::now(),
            event,
        }
    }

    /// Returns the type name of the wrapped event.
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }

    /// Returns the aggregate the wrapped event belongs to, if any.
    pub fn aggregate_id(&self) -> Option<&AggregateId> {
        self.event.correlation_key()
    }

    /// Unwraps the event, dropping the metadata.
    pub fn into_event(self) -> E {
        self.event
    }
}

impl<E: Serialize> EventEnvelope<E> {
    /// Serializes the whole envelope, payload included, to a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
