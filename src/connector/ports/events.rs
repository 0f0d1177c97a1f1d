//! Outbound port for connector lifecycle events.

use crate::connector::domain::ConnectorEvent;
use thiserror::Error;

/// Fire-and-forget delivery of connector events to observers.
///
/// Implementations must not block on slow consumers. A delivery failure is
/// reported to the caller, which logs it and carries on; it never fails the
/// lifecycle operation that produced the event.
pub trait ConnectorEventSink: Send + Sync {
    /// Hands an event to the observer.
    ///
    /// # Errors
    ///
    /// Returns [`EventSinkError`] when the event could not be accepted.
    fn publish(&self, event: ConnectorEvent) -> Result<(), EventSinkError>;
}

/// Errors returned by event sinks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventSinkError {
    /// The bounded queue is full.
    #[error("event queue is full")]
    QueueFull,

    /// The consumer has gone away.
    #[error("event consumer is closed")]
    Closed,

    /// Any other delivery failure.
    #[error("event delivery failed: {0}")]
    Delivery(String),
}
