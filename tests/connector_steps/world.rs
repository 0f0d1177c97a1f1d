//! Shared world state for connector lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::{Map, Value, json};
use switchyard::catalog::{IntegrationCatalog, domain::IntegrationId};
use switchyard::connector::{
    adapters::{
        AesGcmCredentialProtector, CredentialKey, ScriptedCapability, ScriptedCapabilityFactory,
        memory::{InMemoryConnectorRepository, RecordingEventSink},
    },
    domain::{ConnectorInstance, WorkspaceId},
    services::{ConnectionTestReport, ConnectorLoader, ConnectorManager, ConnectorManagerError},
};

/// Manager type used by the BDD world.
pub type TestConnectorManager =
    ConnectorManager<InMemoryConnectorRepository, AesGcmCredentialProtector, DefaultClock>;

/// Scenario world for connector lifecycle behaviour tests.
pub struct ConnectorWorld {
    pub manager: TestConnectorManager,
    pub events: RecordingEventSink,
    pub workspace: WorkspaceId,
    pub pending_config: Map<String, Value>,
    pub pending_credentials: Value,
    pub connector: Option<ConnectorInstance>,
    pub last_create_error: Option<ConnectorManagerError>,
    pub last_execution: Option<Result<Value, ConnectorManagerError>>,
    pub last_report: Option<ConnectionTestReport>,
}

impl ConnectorWorld {
    /// Creates a world whose Slack connectors are backed by a scripted
    /// capability.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog fails to load.
    #[must_use]
    pub fn new() -> Self {
        let capability = ScriptedCapability::new()
            .echoing("sendMessage")
            .responding("listChannels", json!({"channels": ["general", "random"]}))
            .failing("uploadFile", "file type is not permitted")
            .rejecting_secret("bad token");
        let loader = ConnectorLoader::new().with_factory(
            IntegrationId::new("slack").expect("valid integration id"),
            ScriptedCapabilityFactory::new(capability),
        );
        let events = RecordingEventSink::new();
        let manager = ConnectorManager::new(
            Arc::new(IntegrationCatalog::builtin().expect("builtin catalog should load")),
            Arc::new(loader),
            Arc::new(InMemoryConnectorRepository::new()),
            Arc::new(AesGcmCredentialProtector::new(CredentialKey::generate())),
            Arc::new(events.clone()),
            Arc::new(DefaultClock),
        );
        Self {
            manager,
            events,
            workspace: WorkspaceId::new(),
            pending_config: Map::new(),
            pending_credentials: json!({}),
            connector: None,
            last_create_error: None,
            last_execution: None,
            last_report: None,
        }
    }
}

impl Default for ConnectorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConnectorWorld {
    ConnectorWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
