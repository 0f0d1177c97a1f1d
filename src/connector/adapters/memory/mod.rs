//! In-memory adapters for connector persistence and event capture.

mod events;
mod repository;

pub use events::RecordingEventSink;
pub use repository::InMemoryConnectorRepository;
