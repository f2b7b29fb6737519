use std::sync::Arc;

use crate::{AggregateId, DomainEvent, EventEnvelope, EventQuery, Sequence};

/// Core trait for event log implementations.
///
/// A log is append-only: events are never updated, removed or reordered, and
/// the order in which they were appended is the order every read returns.
/// All implementations must be thread-safe (Send + Sync).
pub trait EventLog<E: DomainEvent>: Send + Sync {
    /// Appends an event to the end of the log.
    ///
    /// Never fails. Returns the sequence assigned to the event; the event is
    /// visible to every read that starts after this call returns.
    fn append(&self, event: E) -> Sequence;

    /// Retrieves all events whose correlation key equals `aggregate_id`.
    ///
    /// Events are returned in append order. Returns an empty vector when
    /// nothing matches.
    fn events_for(&self, aggregate_id: &AggregateId) -> Vec<E>;

    /// Retrieves stored envelopes matching a query, in append order.
    fn query(&self, query: &EventQuery) -> Vec<EventEnvelope<E>>;

    /// Returns the total number of events stored.
    fn len(&self) -> usize;
}

impl<E, L> EventLog<E> for Arc<L>
where
    E: DomainEvent,
    L: EventLog<E> + ?Sized,
{
    fn append(&self, event: E) -> Sequence {
        (**self).append(event)
    }

    fn events_for(&self, aggregate_id: &AggregateId) -> Vec<E> {
        (**self).events_for(aggregate_id)
    }

    fn query(&self, query: &EventQuery) -> Vec<EventEnvelope<E>> {
        (**self).query(query)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Extension trait providing convenience methods for event logs.
pub trait EventLogExt<E: DomainEvent>: EventLog<E> {
    /// Appends events one after another, in iteration order.
    ///
    /// Returns the sequence of the last appended event, or `None` if there
    /// was nothing to append.
    fn append_all(&self, events: impl IntoIterator<Item = E>) -> Option<Sequence> {
        events.into_iter().map(|event| self.append(event)).last()
    }

    /// Retrieves the envelopes of one aggregate, in append order.
    fn records_for(&self, aggregate_id: &AggregateId) -> Vec<EventEnvelope<E>> {
        self.query(&EventQuery::for_aggregate(aggregate_id))
    }

    /// Checks if an aggregate has any events.
    fn contains_aggregate(&self, aggregate_id: &AggregateId) -> bool {
        !self.query(&EventQuery::for_aggregate(aggregate_id).limit(1)).is_empty()
    }

    /// Returns true if nothing has been appended yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sequence of the most recent event, or `Sequence::initial()`
    /// for an empty log.
    fn last_sequence(&self) -> Sequence {
        Sequence::new(self.len() as u64)
    }
}

// Blanket implementation for all EventLog implementations
impl<E: DomainEvent, T: EventLog<E> + ?Sized> EventLogExt<E> for T {}
