//! Service-level tests for the connector lifecycle.


use crate::catalog::{IntegrationCatalog, domain::IntegrationId};
use crate::connector::{
    adapters::{
        AesGcmCredentialProtector, CredentialKey,
        memory::{InMemoryConnectorRepository, RecordingEventSink},
    },
    domain::{ConnectorInstance, WorkspaceId},
    ports::{Capability, CapabilityDescriptor, CapabilityResult, ConnectionCheck},
    services::{ConnectorLoader, ConnectorManager, CreateConnectorRequest},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

mock! {
    pub Connection {}

    #[async_trait]
    impl Capability for Connection {
        async fn validate_connection(&self, config: &Value, credentials: &Value) -> ConnectionCheck;
        async fn execute(&self, action: &str, params: Value) -> CapabilityResult<Value>;
        fn descriptor(&self) -> CapabilityDescriptor;
        async fn open(&self) -> CapabilityResult<()>;
        async fn close(&self) -> CapabilityResult<()>;
    }
}

type TestManager =
    ConnectorManager<InMemoryConnectorRepository, AesGcmCredentialProtector, DefaultClock>;

/// Manager wired to in-memory adapters with handles onto each of them.
struct Harness {
    manager: Arc<TestManager>,
    repository: Arc<InMemoryConnectorRepository>,
    protector: Arc<AesGcmCredentialProtector>,
    events: RecordingEventSink,
    builds: Arc<AtomicUsize>,
}

impl Harness {
    fn new(capability: Arc<dyn Capability>) -> Self {
        Self::with_protector(
            capability,
            AesGcmCredentialProtector::new(CredentialKey::generate()),
        )
    }

    fn with_protector(
        capability: Arc<dyn Capability>,
        protector: AesGcmCredentialProtector,
    ) -> Self {
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        let loader = ConnectorLoader::new().with_factory(
            slack_id(),
            move |_config: &Value, _credentials: &Value| -> CapabilityResult<Arc<dyn Capability>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::clone(&capability))
            },
        );
        Self::with_loader(loader, builds, protector, Arc::new(InMemoryConnectorRepository::new()))
    }

    fn with_loader(
        loader: ConnectorLoader,
        builds: Arc<AtomicUsize>,
        protector: AesGcmCredentialProtector,
        repository: Arc<InMemoryConnectorRepository>,
    ) -> Self {
        let catalog = IntegrationCatalog::builtin().expect("builtin catalog should load");
        let shared_protector = Arc::new(protector);
        let events = RecordingEventSink::new();
        let manager = ConnectorManager::new(
            Arc::new(catalog),
            Arc::new(loader),
            Arc::clone(&repository),
            Arc::clone(&shared_protector),
            Arc::new(events.clone()),
            Arc::new(DefaultClock),
        );
        Self {
            manager: Arc::new(manager),
            repository,
            protector: shared_protector,
            events,
            builds,
        }
    }

    fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    async fn create_slack(&self) -> ConnectorInstance {
        self.manager
            .create_connector(slack_request())
            .await
            .expect("slack connector should be created")
    }
}

fn slack_id() -> IntegrationId {
    IntegrationId::new("slack").expect("valid integration id")
}

fn slack_request() -> CreateConnectorRequest {
    CreateConnectorRequest::new("slack", WorkspaceId::new(), "Team Slack")
        .with_config(json!({}))
        .with_credentials(json!({"token": "xoxb-test"}))
}

/// Mock that opens and closes cleanly and advertises the default descriptor.
fn connected_mock() -> MockConnection {
    let mut connection = MockConnection::new();
    connection.expect_open().returning(|| Ok(()));
    connection.expect_close().returning(|| Ok(()));
    connection
        .expect_descriptor()
        .returning(CapabilityDescriptor::default);
    connection
}
