//! Append observers: diagnostics that run after an event is stored.

use serde::Serialize;

use crate::{DomainEvent, EventEnvelope};

/// Receives every envelope the log stores, after it has been stored.
///
/// Observers are a side channel. They cannot reject or alter an append and
/// nothing in the log depends on what they do.
pub trait AppendObserver<E>: Send + Sync {
    /// Called once per appended event.
    fn on_append(&self, envelope: &EventEnvelope<E>);
}

impl<E, F> AppendObserver<E> for F
where
    F: Fn(&EventEnvelope<E>) + Send + Sync,
{
    fn on_append(&self, envelope: &EventEnvelope<E>) {
        self(envelope)
    }
}

/// Logs each stored event, payload included, at `INFO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl<E: DomainEvent + Serialize> AppendObserver<E> for TracingObserver {
    fn on_append(&self, envelope: &EventEnvelope<E>) {
        match envelope.to_json() {
            Ok(payload) => tracing::info!(
                sequence = %envelope.sequence,
                event_type = envelope.event_type(),
                %payload,
                "event stored"
            ),
            Err(error) => tracing::warn!(
                sequence = %envelope.sequence,
                event_type = envelope.event_type(),
                %error,
                "event stored, payload not serializable"
            ),
        }
    }
}
