//! Domain model for workspace-scoped connector instances.
//!
//! A connector instance binds one workspace to one catalog integration with
//! its own configuration, sealed credentials, and lifecycle status. Events
//! describing lifecycle changes and action executions are plain values here;
//! delivery is a port concern.

mod credentials;
mod error;
mod event;
mod ids;
mod instance;
mod status;

pub use credentials::SealedCredentials;
pub use error::{ConnectorDomainError, ParseConnectorStatusError};
pub use event::{ConnectorEvent, ConnectorEventKind, ExecutionOutcome, ExecutionRecord};
pub use ids::{ConnectorId, ConnectorName, WorkspaceId};
pub use instance::{ConnectorInstance, NewConnectorInstance, PersistedConnectorData};
pub use status::ConnectorStatus;
