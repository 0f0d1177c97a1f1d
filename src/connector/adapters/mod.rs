//! Adapter implementations for connector ports.

pub mod memory;
pub mod postgres;

mod crypto;
mod events;
mod scripted;

pub use crypto::{AesGcmCredentialProtector, CredentialKey};
pub use events::{ChannelEventSink, ConnectorEventStream, TracingEventSink};
pub use scripted::{ScriptedCapability, ScriptedCapabilityFactory};
