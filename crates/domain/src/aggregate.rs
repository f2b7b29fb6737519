//! Core aggregate trait.

pub use event_store::DomainEvent;

/// Trait for aggregates in an event-sourced system.
///
/// An aggregate's state is never stored; it is derived by folding the
/// aggregate's events, in order, starting from `Default::default()`.
pub trait Aggregate: Default + Clone + Send + Sync + Sized {
    /// The type of events this aggregate consumes.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This method must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent facts that have happened)
    ///
    /// Implementations match on every event variant without a wildcard arm,
    /// so adding a variant does not compile until its reducer exists.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Folds events into a fresh aggregate.
    fn replay(events: impl IntoIterator<Item = Self::Event>) -> Self {
        let mut aggregate = Self::default();
        aggregate.apply_events(events);
        aggregate
    }
}
