use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    AggregateId, DomainEvent, EventEnvelope, EventQuery, Sequence,
    observer::AppendObserver,
    store::EventLog,
};

/// In-memory event log.
///
/// Cloning the log is cheap and every clone shares the same storage and the
/// same observers, so one log can be handed to several aggregates. Appends
/// take the write lock once, reads take the read lock, so a read always sees a
/// consistent prefix of the log and never a half-written event.
pub struct InMemoryEventLog<E> {
    shared: Arc<Shared<E>>,
}

struct Shared<E> {
    events: RwLock<Vec<EventEnvelope<E>>>,
    observers: RwLock<Vec<Arc<dyn AppendObserver<E>>>>,
}

impl<E: DomainEvent> InMemoryEventLog<E> {
    /// Creates a new empty log with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer and returns the log, for use while building it.
    pub fn with_observer(self, observer: impl AppendObserver<E> + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Registers an observer notified after every append, through any clone.
    ///
    /// Observers are invoked outside the lock, in registration order.
    pub fn add_observer(&self, observer: impl AppendObserver<E> + 'static) {
        self.shared.observers.write().push(Arc::new(observer));
    }

    /// Returns every stored envelope, in append order.
    pub fn snapshot(&self) -> Vec<EventEnvelope<E>> {
        self.shared.events.read().clone()
    }
}

impl<E> Default for InMemoryEventLog<E> {
    fn default() -> Self {
        Self {
            shared: Arc::new(Shared {
                events: RwLock::new(Vec::new()),
                observers: RwLock::new(Vec::new()),
            }),
        }
    }
}

impl<E> Clone for InMemoryEventLog<E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E> std::fmt::Debug for InMemoryEventLog<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEventLog")
            .field("len", &self.shared.events.read().len())
            .field("observers", &self.shared.observers.read().len())
            .finish()
    }
}

impl<E: DomainEvent> EventLog<E> for InMemoryEventLog<E> {
    fn append(&self, event: E) -> Sequence {
        let envelope = {
            let mut store = self.shared.events.write();
            let sequence = Sequence::new(store.len() as u64).next();
            let envelope = EventEnvelope::new(sequence, event);
            store.push(envelope.clone());
            envelope
        };

        metrics::counter!("event_log_appends_total", "event_type" => envelope.event_type())
            .increment(1);
        tracing::debug!(
            sequence = %envelope.sequence,
            event_type = envelope.event_type(),
            aggregate_id = envelope.aggregate_id().map(AggregateId::as_str),
            "event appended"
        );

        let observers = self.shared.observers.read().clone();
        for observer in &observers {
            observer.on_append(&envelope);
        }

        envelope.sequence
    }

    fn events_for(&self, aggregate_id: &AggregateId) -> Vec<E> {
        let store = self.shared.events.read();
        let events: Vec<_> = store
            .iter()
            .filter(|e| e.aggregate_id() == Some(aggregate_id))
            .map(|e| e.event.clone())
            .collect();

        tracing::debug!(%aggregate_id, matched = events.len(), total = store.len(), "events loaded");
        events
    }

    fn query(&self, query: &EventQuery) -> Vec<EventEnvelope<E>> {
        let store = self.shared.events.read();
        let events = store
            .iter()
            .filter(|&e| query.matches(e))
            .skip(query.offset.unwrap_or(0))
            .cloned();

        match query.limit {
            Some(limit) => events.take(limit).collect(),
            None => events.collect(),
        }
    }

    fn len(&self) -> usize {
        self.shared.events.read().len()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::store::EventLogExt;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Opened { id: AggregateId },
        Noted { id: AggregateId, note: String },
        Tick,
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Opened { .. } => "Opened",
                TestEvent::Noted { .. } => "Noted",
                TestEvent::Tick => "Tick",
            }
        }

        fn correlation_key(&self) -> Option<&AggregateId> {
            match self {
                TestEvent::Opened { id } | TestEvent::Noted { id, .. } => Some(id),
                TestEvent::Tick => None,
            }
        }
    }

    fn new_log() -> InMemoryEventLog<TestEvent> {
        InMemoryEventLog::new()
    }

    fn opened(id: &str) -> TestEvent {
        TestEvent::Opened { id: id.into() }
    }

    fn noted(id: &str, note: &str) -> TestEvent {
        TestEvent::Noted {
            id: id.into(),
            note: note.to_string(),
        }
    }

    #[test]
    fn append_single_event() {
        let log = new_log();

        let sequence = log.append(opened("o1"));
        assert_eq!(sequence, Sequence::first());

        let events = log.events_for(&"o1".into());
        assert_eq!(events, vec![opened("o1")]);
    }

    #[test]
    fn sequences_increase_by_one() {
        let log = new_log();

        let s1 = log.append(opened("o1"));
        let s2 = log.append(opened("o2"));
        let s3 = log.append(TestEvent::Tick);

        assert_eq!(s1, Sequence::new(1));
        assert_eq!(s2, Sequence::new(2));
        assert_eq!(s3, Sequence::new(3));
        assert_eq!(log.last_sequence(), s3);
    }

    #[test]
    fn events_for_preserves_append_order() {
        let log = new_log();
        log.append(opened("o1"));
        log.append(noted("o2", "elsewhere"));
        log.append(noted("o1", "first"));
        log.append(noted("o1", "second"));

        let events = log.events_for(&"o1".into());
        assert_eq!(
            events,
            vec![opened("o1"), noted("o1", "first"), noted("o1", "second")]
        );
    }

    #[test]
    fn events_for_unknown_aggregate_is_empty() {
        let log = new_log();
        log.append(opened("o1"));

        assert!(log.events_for(&"missing".into()).is_empty());
    }

    #[test]
    fn uncorrelated_events_are_never_returned_by_identity() {
        let log = new_log();
        log.append(TestEvent::Tick);
        log.append(opened("o1"));
        log.append(TestEvent::Tick);

        assert_eq!(log.events_for(&"o1".into()), vec![opened("o1")]);
        assert!(log.events_for(&AggregateId::default()).is_empty());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn clones_share_storage() {
        let log = new_log();
        let other = log.clone();

        other.append(opened("o1"));

        assert_eq!(log.len(), 1);
        assert!(log.contains_aggregate(&"o1".into()));
    }

    #[test]
    fn append_all_returns_last_sequence() {
        let log = new_log();

        assert_eq!(log.append_all(Vec::new()), None);
        assert!(log.is_empty());

        let last = log.append_all(vec![opened("o1"), noted("o1", "a"), noted("o1", "b")]);
        assert_eq!(last, Some(Sequence::new(3)));
    }

    #[test]
    fn records_for_carries_sequences() {
        let log = new_log();
        log.append(opened("o1"));
        log.append(opened("o2"));
        log.append(noted("o1", "a"));

        let records = log.records_for(&"o1".into());
        let sequences: Vec<_> = records.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![Sequence::new(1), Sequence::new(3)]);
    }

    #[test]
    fn query_events_with_filters() {
        let log = new_log();
        log.append_all(vec![
            opened("o1"),
            noted("o1", "a"),
            noted("o2", "b"),
            noted("o1", "c"),
            TestEvent::Tick,
        ]);

        let query = EventQuery::for_event_type("Noted").from_sequence(Sequence::new(3));
        let results = log.query(&query);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].event, noted("o2", "b"));
        assert_eq!(results[1].event, noted("o1", "c"));

        let paged = log.query(&EventQuery::new().offset(1).limit(2));
        let sequences: Vec<_> = paged.iter().map(|r| r.sequence.as_u64()).collect();
        assert_eq!(sequences, vec![2, 3]);
    }

    #[test]
    fn observers_see_each_append_once_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let log = new_log().with_observer(move |envelope: &EventEnvelope<TestEvent>| {
            sink.lock().push((envelope.sequence, envelope.event_type()));
        });

        log.append(opened("o1"));
        log.append(TestEvent::Tick);
        log.append(noted("o1", "a"));

        assert_eq!(
            *seen.lock(),
            vec![
                (Sequence::new(1), "Opened"),
                (Sequence::new(2), "Tick"),
                (Sequence::new(3), "Noted"),
            ]
        );
    }

    #[test]
    fn observer_may_read_the_log() {
        let log = new_log();
        let reader = log.clone();
        let lengths = Arc::new(Mutex::new(Vec::new()));
        let sink = lengths.clone();
        let log = log.with_observer(move |_: &EventEnvelope<TestEvent>| {
            sink.lock().push(reader.len());
        });

        log.append(opened("o1"));
        log.append(opened("o2"));

        assert_eq!(*lengths.lock(), vec![1, 2]);
    }

    #[test]
    fn observer_sees_appends_through_earlier_clones() {
        let log = new_log();
        let writer = log.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let log = log.with_observer(move |envelope: &EventEnvelope<TestEvent>| {
            sink.lock().push(envelope.sequence);
        });
        writer.append(opened("o1"));
        log.append(opened("o2"));

        assert_eq!(*seen.lock(), vec![Sequence::new(1), Sequence::new(2)]);
    }

    #[test]
    fn add_observer_through_shared_handle() {
        let log = new_log();
        log.append(opened("o1"));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        log.clone()
            .add_observer(move |envelope: &EventEnvelope<TestEvent>| {
                sink.lock().push(envelope.event_type());
            });
        log.append(TestEvent::Tick);

        assert_eq!(*seen.lock(), vec!["Tick"]);
        assert!(format!("{log:?}").contains("observers: 1"));
    }

    #[test]
    fn snapshot_returns_everything() {
        let log = new_log();
        log.append(opened("o1"));
        log.append(TestEvent::Tick);

        let all = log.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].event, TestEvent::Tick);
    }

    #[test]
    fn shared_behind_trait_object() {
        let log: Arc<dyn EventLog<TestEvent>> = Arc::new(new_log());
        log.append(opened("o1"));

        assert_eq!(log.events_for(&"o1".into()).len(), 1);
        assert_eq!(log.last_sequence(), Sequence::first());
    }
}
