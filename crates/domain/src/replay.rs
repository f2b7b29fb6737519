//! Replay engine: issues events into a log and rebuilds aggregates from it.

use common::AggregateId;
use event_store::{EventLog, Sequence};

use crate::aggregate::Aggregate;

/// Binds one aggregate type to one event log.
///
/// The engine is responsible for:
/// 1. Appending the events an aggregate issues
/// 2. Rebuilding an aggregate by folding its events in append order
/// 3. Keeping the last rebuilt state for callers to read
///
/// State is only ever produced by a rebuild; issuing events never touches it.
pub struct ReplayEngine<L, A>
where
    A: Aggregate,
    L: EventLog<A::Event>,
{
    log: L,
    state: Option<A>,
}

impl<L, A> ReplayEngine<L, A>
where
    A: Aggregate,
    L: EventLog<A::Event>,
{
    /// Creates a new engine over the given log.
    pub fn new(log: L) -> Self {
        Self {
            log,
            state: None,
        }
    }

    /// Returns a reference to the underlying log.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Appends an event to the log.
    pub fn issue(&self, event: A::Event) -> Sequence {
        self.log.append(event)
    }

    /// Folds the events of one aggregate without caching the result.
    ///
    /// An aggregate with no events comes back as `A::default()`.
    pub fn load(&self, aggregate_id: &AggregateId) -> A {
        let events = self.log.events_for(aggregate_id);
        let replayed = events.len();
        let aggregate = A::replay(events);

        metrics::counter!("aggregate_replays_total", "aggregate_type" => A::aggregate_type())
            .increment(1);
        metrics::histogram!("aggregate_replayed_events").record(replayed as f64);
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            %aggregate_id,
            replayed,
            "aggregate replayed"
        );

        aggregate
    }

    /// Rebuilds an aggregate from scratch and stores it as the current state.
    ///
    /// Any previously stored state is replaced, never patched.
    pub fn rebuild(&mut self, aggregate_id: &AggregateId) -> &A {
        let aggregate = self.load(aggregate_id);
        self.state.insert(aggregate)
    }

    /// Returns the last rebuilt state, or `None` if nothing was rebuilt yet.
    pub fn state(&self) -> Option<&A> {
        self.state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use event_store::{DomainEvent, EventLogExt, InMemoryEventLog};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counted {
        id: AggregateId,
        by: i64,
    }

    impl DomainEvent for Counted {
        fn event_type(&self) -> &'static str {
            "Counted"
        }

        fn correlation_key(&self) -> Option<&AggregateId> {
            Some(&self.id)
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        total: i64,
        steps: Vec<i64>,
    }

    impl Aggregate for Counter {
        type Event = Counted;

        fn aggregate_type() -> &'static str {
            "Counter"
        }

        fn apply(&mut self, event: Self::Event) {
            self.total += event.by;
            self.steps.push(event.by);
        }
    }

    fn count(id: &str, by: i64) -> Counted {
        Counted { id: id.into(), by }
    }

    fn engine() -> ReplayEngine<InMemoryEventLog<Counted>, Counter> {
        ReplayEngine::new(InMemoryEventLog::new())
    }

    #[test]
    fn state_is_absent_until_first_rebuild() {
        let engine = engine();
        engine.issue(count("c1", 1));

        assert!(engine.state().is_none());
    }

    #[test]
    fn issue_appends_without_touching_state() {
        let mut engine = engine();
        engine.rebuild(&"c1".into());
        engine.issue(count("c1", 5));

        assert_eq!(engine.state(), Some(&Counter::default()));
        assert_eq!(engine.log().len(), 1);
    }

    #[test]
    fn rebuild_folds_in_append_order() {
        let mut engine = engine();
        engine.issue(count("c1", 3));
        engine.issue(count("c2", 100));
        engine.issue(count("c1", -1));

        let state = engine.rebuild(&"c1".into());
        assert_eq!(state.total, 2);
        assert_eq!(state.steps, vec![3, -1]);
    }

    #[test]
    fn rebuild_replaces_previous_state() {
        let mut engine = engine();
        engine.issue(count("c1", 3));
        engine.rebuild(&"c1".into());

        let state = engine.rebuild(&"c2".into()).clone();
        assert_eq!(state, Counter::default());
        assert_eq!(engine.state(), Some(&Counter::default()));
    }

    #[test]
    fn load_does_not_cache() {
        let engine = engine();
        engine.log().append_all(vec![count("c1", 1), count("c1", 2)]);

        assert_eq!(engine.load(&"c1".into()).total, 3);
        assert!(engine.state().is_none());
    }
}
