//! In-memory event sink that records everything it receives.

use crate::connector::{
    domain::{ConnectorEvent, ConnectorEventKind},
    ports::{ConnectorEventSink, EventSinkError},
};
use std::sync::{Arc, Mutex, PoisonError};

/// Event sink that keeps every published event in memory.
///
/// Intended for tests and local inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<ConnectorEvent>>>,
}

impl RecordingEventSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event in publication order.
    #[must_use]
    pub fn events(&self) -> Vec<ConnectorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the recorded events of one kind.
    #[must_use]
    pub fn events_of(&self, kind: ConnectorEventKind) -> Vec<ConnectorEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.kind == kind)
            .collect()
    }
}

impl ConnectorEventSink for RecordingEventSink {
    fn publish(&self, event: ConnectorEvent) -> Result<(), EventSinkError> {
        self.events
            .lock()
            .map_err(|err| EventSinkError::Delivery(err.to_string()))?
            .push(event);
        Ok(())
    }
}
