//! Application services for connector loading and lifecycle orchestration.

mod connections;
mod lifecycle;
mod loader;
mod locks;

pub use lifecycle::{
    ConnectionTestReport, ConnectorErrorKind, ConnectorManager, ConnectorManagerError,
    ConnectorManagerResult, CreateConnectorRequest, RestoreReport, UpdateConnectorRequest,
};
pub use loader::{CapabilityFactory, ConnectorLoader, LoaderError};
