//! Port contracts for connector lifecycle orchestration.

mod capability;
mod events;
mod protector;
mod repository;

pub use capability::{
    Capability, CapabilityDescriptor, CapabilityError, CapabilityResult, ConnectionCheck, RateLimit,
};
pub use events::{ConnectorEventSink, EventSinkError};
pub use protector::{CredentialProtectionError, CredentialProtector};
pub use repository::{ConnectorRepository, ConnectorRepositoryError, ConnectorRepositoryResult};
