//! Event sinks for production observers.

use crate::connector::{
    domain::ConnectorEvent,
    ports::{ConnectorEventSink, EventSinkError},
};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Event sink that forwards events onto a bounded tokio channel.
///
/// Publishing never waits: a full queue drops the event and reports
/// [`EventSinkError::QueueFull`].
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: mpsc::Sender<ConnectorEvent>,
}

impl ChannelEventSink {
    /// Creates a sink and its receiving stream with the given queue capacity.
    ///
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, ConnectorEventStream) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, ConnectorEventStream { receiver })
    }
}

impl ConnectorEventSink for ChannelEventSink {
    fn publish(&self, event: ConnectorEvent) -> Result<(), EventSinkError> {
        self.sender.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => EventSinkError::QueueFull,
            TrySendError::Closed(_) => EventSinkError::Closed,
        })
    }
}

/// Receiving half of a [`ChannelEventSink`].
#[derive(Debug)]
pub struct ConnectorEventStream {
    receiver: mpsc::Receiver<ConnectorEvent>,
}

impl ConnectorEventStream {
    /// Waits for the next event; `None` once every sink has been dropped.
    pub async fn recv(&mut self) -> Option<ConnectorEvent> {
        self.receiver.recv().await
    }

    /// Returns the next buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<ConnectorEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Event sink that writes each event to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl ConnectorEventSink for TracingEventSink {
    fn publish(&self, event: ConnectorEvent) -> Result<(), EventSinkError> {
        tracing::info!(
            target: "switchyard::events",
            kind = event.kind.as_str(),
            connector_id = %event.connector_id,
            workspace_id = %event.workspace_id,
            timestamp = %event.timestamp,
            "connector event"
        );
        Ok(())
    }
}
