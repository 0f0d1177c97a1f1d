//! Connector lifecycle orchestration.
//!
//! [`ConnectorManager`] owns the table of live capability handles and keeps
//! it consistent with the repository. Every mutation of a connector runs
//! under that connector's write lock; executions and connection tests share
//! the read side so many calls can be in flight against one connector while
//! teardown waits for them to drain.

use super::{
    connections::LiveConnections,
    loader::{ConnectorLoader, LoaderError},
    locks::InstanceLocks,
};
use crate::catalog::{
    IntegrationCatalog,
    domain::{IntegrationDefinition, IntegrationId, PayloadKind, SchemaViolation},
};
use crate::connector::{
    domain::{
        ConnectorDomainError, ConnectorEvent, ConnectorEventKind, ConnectorId, ConnectorInstance,
        ConnectorName, ConnectorStatus, ExecutionOutcome, ExecutionRecord, NewConnectorInstance,
        WorkspaceId,
    },
    ports::{
        Capability, CapabilityDescriptor, CapabilityError, ConnectorEventSink, ConnectorRepository,
        ConnectorRepositoryError, CredentialProtectionError, CredentialProtector,
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{fmt, sync::Arc};
use thiserror::Error;

const REDACTED: &str = "<redacted>";

/// Request payload for creating a connector instance.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateConnectorRequest {
    integration_id: String,
    workspace_id: WorkspaceId,
    name: String,
    config: Value,
    credentials: Value,
}

impl CreateConnectorRequest {
    /// Creates a request with empty configuration and credentials.
    #[must_use]
    pub fn new(
        integration_id: impl Into<String>,
        workspace_id: WorkspaceId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            integration_id: integration_id.into(),
            workspace_id,
            name: name.into(),
            config: json!({}),
            credentials: json!({}),
        }
    }

    /// Sets the configuration payload.
    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Sets the plaintext credential payload.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Value) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Partial update for a connector instance.
///
/// Absent fields are left untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UpdateConnectorRequest {
    name: Option<String>,
    config: Option<Value>,
    credentials: Option<Value>,
}

impl fmt::Debug for CreateConnectorRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CreateConnectorRequest")
            .field("integration_id", &self.integration_id)
            .field("workspace_id", &self.workspace_id)
            .field("name", &self.name)
            .field("config", &self.config)
            .field("credentials", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for UpdateConnectorRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("UpdateConnectorRequest")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("credentials", &self.credentials.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl UpdateConnectorRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the connector.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the configuration payload.
    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the plaintext credential payload.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Value) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// Result of a connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestReport {
    /// Whether the remote service accepted the connection.
    pub success: bool,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Implementation-specific diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ConnectionTestReport {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            details: None,
        }
    }
}

/// Summary of [`ConnectorManager::restore_connections`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Connectors whose live connection was rebuilt.
    pub restored: usize,
    /// Connectors skipped because they are not expected to be live.
    pub skipped: usize,
    /// Connectors whose connection could not be rebuilt; now marked `error`.
    pub failed: Vec<ConnectorId>,
}

/// Error taxonomy exposed to callers of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorErrorKind {
    /// Unknown integration or connector.
    NotFound,
    /// Name, configuration, or credentials failed validation.
    InvalidConfiguration,
    /// The catalog names an integration the loader cannot build.
    ImplementationMissing,
    /// The action is not declared or not handled.
    UnsupportedOperation,
    /// Credentials could not be sealed or revealed.
    CredentialProtectionUnavailable,
    /// The connector has no live connection.
    Unavailable,
    /// The capability failed.
    Connector,
    /// The repository failed.
    Persistence,
}

/// Service-level errors for connector lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum ConnectorManagerError {
    /// The integration is not in the catalog.
    #[error("integration not found: {0}")]
    IntegrationNotFound(String),

    /// The connector does not exist.
    #[error("connector not found: {0}")]
    ConnectorNotFound(ConnectorId),

    /// The connector name is invalid.
    #[error(transparent)]
    InvalidName(#[from] ConnectorDomainError),

    /// A payload failed schema validation.
    #[error(transparent)]
    InvalidConfiguration(#[from] SchemaViolation),

    /// No implementation is registered for the integration.
    #[error(transparent)]
    ImplementationMissing(#[from] LoaderError),

    /// The action is not declared by the integration.
    #[error("integration {integration_id} does not declare action {action}")]
    UnsupportedOperation {
        /// Integration of the targeted connector.
        integration_id: IntegrationId,
        /// Requested action.
        action: String,
    },

    /// Credentials could not be sealed or revealed.
    #[error("credential protection unavailable: {0}")]
    CredentialProtection(#[from] CredentialProtectionError),

    /// The connector exists but has no live connection.
    #[error("connector {connector_id} is unavailable (status: {status})")]
    ConnectorUnavailable {
        /// Affected connector.
        connector_id: ConnectorId,
        /// Current lifecycle status.
        status: ConnectorStatus,
    },

    /// The live connection could not be established; the connector is now
    /// recorded with status `error`.
    #[error("connector {connector_id} could not connect: {source}")]
    ConnectionFailed {
        /// Affected connector.
        connector_id: ConnectorId,
        /// Underlying failure.
        #[source]
        source: CapabilityError,
    },

    /// The capability failed while executing an action.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ConnectorRepositoryError),
}

impl ConnectorManagerError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ConnectorErrorKind {
        match self {
            Self::IntegrationNotFound(_) | Self::ConnectorNotFound(_) => {
                ConnectorErrorKind::NotFound
            }
            Self::InvalidName(_) | Self::InvalidConfiguration(_) => {
                ConnectorErrorKind::InvalidConfiguration
            }
            Self::ImplementationMissing(_) => ConnectorErrorKind::ImplementationMissing,
            Self::UnsupportedOperation { .. }
            | Self::Capability(CapabilityError::UnsupportedOperation(_)) => {
                ConnectorErrorKind::UnsupportedOperation
            }
            Self::CredentialProtection(_) => ConnectorErrorKind::CredentialProtectionUnavailable,
            Self::ConnectorUnavailable { .. } => ConnectorErrorKind::Unavailable,
            Self::ConnectionFailed { .. } | Self::Capability(_) => ConnectorErrorKind::Connector,
            Self::Repository(_) => ConnectorErrorKind::Persistence,
        }
    }
}

impl From<ConnectorRepositoryError> for ConnectorManagerError {
    fn from(err: ConnectorRepositoryError) -> Self {
        match err {
            ConnectorRepositoryError::NotFound(id) => Self::ConnectorNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for connector manager operations.
pub type ConnectorManagerResult<T> = Result<T, ConnectorManagerError>;

/// Connector lifecycle manager.
pub struct ConnectorManager<R, P, C>
where
    R: ConnectorRepository,
    P: CredentialProtector,
    C: Clock + Send + Sync + 'static,
{
    catalog: Arc<IntegrationCatalog>,
    loader: Arc<ConnectorLoader>,
    repository: Arc<R>,
    protector: Arc<P>,
    events: Arc<dyn ConnectorEventSink>,
    clock: Arc<C>,
    connections: LiveConnections,
    locks: InstanceLocks,
}

impl<R, P, C> ConnectorManager<R, P, C>
where
    R: ConnectorRepository,
    P: CredentialProtector,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a manager with an empty live-connection table.
    ///
    /// Call [`Self::restore_connections`] after construction to rebuild
    /// connections for instances persisted by an earlier process.
    #[must_use]
    pub fn new(
        catalog: Arc<IntegrationCatalog>,
        loader: Arc<ConnectorLoader>,
        repository: Arc<R>,
        protector: Arc<P>,
        events: Arc<dyn ConnectorEventSink>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            catalog,
            loader,
            repository,
            protector,
            events,
            clock,
            connections: LiveConnections::default(),
            locks: InstanceLocks::default(),
        }
    }

    /// Returns the integration catalog.
    #[must_use]
    pub fn catalog(&self) -> &IntegrationCatalog {
        &self.catalog
    }

    /// Creates a connector instance and opens its live connection.
    ///
    /// Validation and lookup failures are reported before anything is
    /// sealed, constructed, or stored. When the live connection cannot be
    /// established the instance is still stored, with status `error`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown integrations, invalid
    /// payloads, missing implementations, credential protection failures,
    /// connection failures, or repository failures.
    pub async fn create_connector(
        &self,
        request: CreateConnectorRequest,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let CreateConnectorRequest {
            integration_id,
            workspace_id,
            name,
            config,
            credentials,
        } = request;

        let definition = self.definition_for_slug(&integration_id)?;
        let connector_name = ConnectorName::new(name)?;
        validate_payloads(definition, &config, &credentials)?;
        let factory = self.loader.resolve(definition.id())?;
        let sealed = self.protector.seal(&credentials)?;

        let mut instance = ConnectorInstance::new(
            NewConnectorInstance {
                integration_id: definition.id().clone(),
                workspace_id,
                name: connector_name,
                config,
                credentials: sealed,
            },
            &*self.clock,
        );

        let connection = match factory.build(instance.config(), &credentials) {
            Ok(handle) => open_handle(handle).await,
            Err(err) => Err(err),
        };

        match connection {
            Ok(handle) => {
                self.connections.insert(instance.id(), Arc::clone(&handle));
                if let Err(err) = self.repository.insert(&instance).await {
                    self.connections.remove(instance.id());
                    close_handle(instance.id(), handle).await;
                    return Err(err.into());
                }
                tracing::info!(
                    connector_id = %instance.id(),
                    integration_id = %instance.integration_id(),
                    workspace_id = %instance.workspace_id(),
                    "connector created"
                );
                self.emit(lifecycle_event(ConnectorEventKind::Created, &instance, &*self.clock));
                Ok(instance)
            }
            Err(source) => {
                instance.mark_error(source.to_string(), &*self.clock);
                self.repository.insert(&instance).await?;
                tracing::warn!(
                    connector_id = %instance.id(),
                    integration_id = %instance.integration_id(),
                    error = %source,
                    "connector created without a live connection"
                );
                self.emit(lifecycle_event(ConnectorEventKind::Created, &instance, &*self.clock));
                Err(ConnectorManagerError::ConnectionFailed {
                    connector_id: instance.id(),
                    source,
                })
            }
        }
    }

    /// Applies a partial update.
    ///
    /// When configuration or credentials change, the live connection is
    /// rebuilt from the new payloads before the old one is released, so stale
    /// credentials never stay live. Inactive connectors are updated without
    /// reconnecting.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors, invalid
    /// payloads, credential protection failures, repository failures, or
    /// when the new connection cannot be established (the connector is then
    /// stored with status `error` and holds no live connection).
    pub async fn update_connector(
        &self,
        id: ConnectorId,
        request: UpdateConnectorRequest,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let _guard = self.locks.write(id).await;
        let mut instance = self.find_or_error(id).await?;
        let definition = self.definition_for(instance.integration_id())?;

        let new_name = request.name.map(ConnectorName::new).transpose()?;
        if let Some(config) = &request.config {
            definition
                .config_schema()
                .validate(PayloadKind::Config, config)?;
        }
        if let Some(credentials) = &request.credentials {
            definition
                .credentials_schema()
                .validate(PayloadKind::Credentials, credentials)?;
        }

        let mut changed = Vec::new();
        if let Some(name) = new_name.filter(|name| name != instance.name()) {
            instance.rename(name, &*self.clock);
            changed.push("name");
        }
        if let Some(config) = request.config.filter(|config| config != instance.config()) {
            instance.replace_config(config, &*self.clock);
            changed.push("config");
        }
        let mut replacement_credentials = None;
        if let Some(credentials) = request.credentials {
            let stored = self.protector.reveal(instance.credentials())?;
            if credentials != stored {
                let sealed = self.protector.seal(&credentials)?;
                instance.replace_credentials(sealed, &*self.clock);
                changed.push("credentials");
                replacement_credentials = Some(credentials);
            }
        }

        if changed.is_empty() {
            return Ok(instance);
        }

        let reconnect = changed.iter().any(|field| *field != "name")
            && instance.status() != ConnectorStatus::Inactive;
        let outcome = if reconnect {
            let credentials = match replacement_credentials {
                Some(credentials) => credentials,
                None => self.protector.reveal(instance.credentials())?,
            };
            self.reconnect_with(&mut instance, &credentials).await
        } else {
            self.repository.update(&instance).await.map_err(Into::into)
        };

        if is_recorded(&outcome) {
            tracing::info!(
                connector_id = %id,
                fields = ?changed,
                status = %instance.status(),
                "connector updated"
            );
            self.emit(updated_event(&instance, &changed, &*self.clock));
        }
        outcome.map(|()| instance)
    }

    /// Deletes a connector and releases its live connection.
    ///
    /// Waits for in-flight executions against the connector to finish. A
    /// failure to close the connection is logged and does not block removal.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError::ConnectorNotFound`] for unknown
    /// connectors and [`ConnectorManagerError::Repository`] when removal
    /// fails, in which case the live connection is left in place.
    pub async fn delete_connector(&self, id: ConnectorId) -> ConnectorManagerResult<()> {
        let _guard = self.locks.write(id).await;
        let instance = self.find_or_error(id).await?;

        let handle = self.connections.remove(id);
        if let Err(err) = self.repository.delete(id).await {
            if let Some(restored) = handle {
                self.connections.insert(id, restored);
            }
            return Err(err.into());
        }
        if let Some(released) = handle {
            close_handle(id, released).await;
        }
        self.locks.forget(id);

        tracing::info!(
            connector_id = %id,
            integration_id = %instance.integration_id(),
            "connector deleted"
        );
        self.emit(ConnectorEvent::new(
            ConnectorEventKind::Deleted,
            id,
            instance.workspace_id(),
            json!({ "integration_id": instance.integration_id().as_str() }),
            &*self.clock,
        ));
        Ok(())
    }

    /// Checks the live connection against the remote service.
    ///
    /// Never fails: unknown connectors, missing connections, credential
    /// problems, and panics inside the capability are all reported as an
    /// unsuccessful test.
    pub async fn test_connector(&self, id: ConnectorId) -> ConnectionTestReport {
        let guard = self.locks.read(id).await;
        let instance = match self.repository.find_by_id(id).await {
            Ok(Some(instance)) => instance,
            Ok(None) => return ConnectionTestReport::failed(format!("connector not found: {id}")),
            Err(err) => return ConnectionTestReport::failed(err.to_string()),
        };
        let Some(handle) = self.connections.get(id) else {
            return ConnectionTestReport::failed(format!(
                "connector has no live connection (status: {})",
                instance.status()
            ));
        };
        let credentials = match self.protector.reveal(instance.credentials()) {
            Ok(credentials) => credentials,
            Err(err) => return ConnectionTestReport::failed(err.to_string()),
        };
        let config = instance.config().clone();

        let check = tokio::spawn(async move {
            let _held = guard;
            handle.validate_connection(&config, &credentials).await
        })
        .await;

        match check {
            Ok(check) if check.valid => ConnectionTestReport {
                success: true,
                message: Some("connection successful".to_owned()),
                details: check.details,
            },
            Ok(check) => ConnectionTestReport {
                success: false,
                message: Some(
                    check
                        .error
                        .unwrap_or_else(|| "connection rejected".to_owned()),
                ),
                details: check.details,
            },
            Err(join_error) => {
                tracing::warn!(connector_id = %id, error = %join_error, "connection test aborted");
                ConnectionTestReport::failed(format!("connection test aborted: {join_error}"))
            }
        }
    }

    /// Executes an action on the connector's live connection.
    ///
    /// The action must be declared by the integration; undeclared actions are
    /// rejected before dispatch. The call runs on its own task, so a caller
    /// that stops waiting does not cancel it, and the `action:executed` or
    /// `action:failed` event is emitted either way. Executions never write to
    /// the repository.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors, undeclared
    /// actions, connectors without a live connection, or capability failures.
    pub async fn execute_action(
        &self,
        id: ConnectorId,
        action: &str,
        params: Value,
    ) -> ConnectorManagerResult<Value> {
        let guard = self.locks.read(id).await;
        let instance = self.find_or_error(id).await?;
        let definition = self.definition_for(instance.integration_id())?;
        if !definition.declares_action(action) {
            return Err(ConnectorManagerError::UnsupportedOperation {
                integration_id: instance.integration_id().clone(),
                action: action.to_owned(),
            });
        }
        let handle = self
            .connections
            .get(id)
            .ok_or(ConnectorManagerError::ConnectorUnavailable {
                connector_id: id,
                status: instance.status(),
            })?;

        tracing::debug!(connector_id = %id, action, "dispatching action");
        let dispatch = Dispatch {
            connector_id: id,
            workspace_id: instance.workspace_id(),
            action: action.to_owned(),
            params,
        };
        let events = Arc::clone(&self.events);
        let clock = Arc::clone(&self.clock);
        let completed = tokio::spawn(async move {
            let _held = guard;
            dispatch.run(handle, events.as_ref(), clock.as_ref()).await
        })
        .await;

        match completed {
            Ok(result) => result.map_err(ConnectorManagerError::Capability),
            Err(join_error) => Err(ConnectorManagerError::Capability(CapabilityError::Panicked(
                join_error.to_string(),
            ))),
        }
    }

    /// Returns the descriptor advertised by the connector's live connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors or connectors
    /// without a live connection.
    pub async fn connector_capabilities(
        &self,
        id: ConnectorId,
    ) -> ConnectorManagerResult<CapabilityDescriptor> {
        let _guard = self.locks.read(id).await;
        let instance = self.find_or_error(id).await?;
        self.connections
            .get(id)
            .map(|handle| handle.descriptor())
            .ok_or(ConnectorManagerError::ConnectorUnavailable {
                connector_id: id,
                status: instance.status(),
            })
    }

    /// Releases the live connection and marks the connector inactive.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors or repository
    /// failures.
    pub async fn deactivate_connector(
        &self,
        id: ConnectorId,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let _guard = self.locks.write(id).await;
        let mut instance = self.find_or_error(id).await?;
        if instance.status() == ConnectorStatus::Inactive {
            return Ok(instance);
        }

        instance.mark_inactive(&*self.clock);
        self.repository.update(&instance).await?;
        if let Some(released) = self.connections.remove(id) {
            close_handle(id, released).await;
        }

        tracing::info!(connector_id = %id, "connector deactivated");
        self.emit(lifecycle_event(ConnectorEventKind::Updated, &instance, &*self.clock));
        Ok(instance)
    }

    /// Re-opens the live connection of an inactive or failed connector.
    ///
    /// Connectors that are already active with a live connection are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors, credential
    /// protection failures, missing implementations, repository failures, or
    /// when the connection cannot be established.
    pub async fn activate_connector(
        &self,
        id: ConnectorId,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let _guard = self.locks.write(id).await;
        let instance = self.find_or_error(id).await?;
        if instance.status() == ConnectorStatus::Active && self.connections.contains(id) {
            return Ok(instance);
        }
        self.reconnect_stored(instance).await
    }

    /// Tears down and rebuilds the live connection unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError`] for unknown connectors, credential
    /// protection failures, missing implementations, repository failures, or
    /// when the connection cannot be established.
    pub async fn reconnect_connector(
        &self,
        id: ConnectorId,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let _guard = self.locks.write(id).await;
        let instance = self.find_or_error(id).await?;
        self.reconnect_stored(instance).await
    }

    /// Rebuilds live connections for every stored active connector without
    /// one.
    ///
    /// Failures are recorded on the affected connectors and counted in the
    /// report rather than aborting the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError::Repository`] when the stored
    /// connectors cannot be listed.
    pub async fn restore_connections(&self) -> ConnectorManagerResult<RestoreReport> {
        let mut report = RestoreReport::default();
        for stored in self.repository.list_all().await? {
            let id = stored.id();
            if !stored.status().expects_live_connection() || self.connections.contains(id) {
                report.skipped += 1;
                continue;
            }

            let _guard = self.locks.write(id).await;
            let current = match self.repository.find_by_id(id).await? {
                Some(current) if current.status().expects_live_connection() => current,
                _ => {
                    report.skipped += 1;
                    continue;
                }
            };
            match self.reconnect_stored(current).await {
                Ok(_) => report.restored += 1,
                Err(err) => {
                    tracing::warn!(connector_id = %id, error = %err, "connection not restored");
                    report.failed.push(id);
                }
            }
        }

        tracing::info!(
            restored = report.restored,
            skipped = report.skipped,
            failed = report.failed.len(),
            "live connections restored"
        );
        Ok(report)
    }

    /// Retrieves a connector by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError::Repository`] when lookup fails.
    pub async fn get_connector(
        &self,
        id: ConnectorId,
    ) -> ConnectorManagerResult<Option<ConnectorInstance>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists the connectors of a workspace, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorManagerError::Repository`] when lookup fails.
    pub async fn get_connectors_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ConnectorManagerResult<Vec<ConnectorInstance>> {
        Ok(self.repository.list_by_workspace(workspace_id).await?)
    }

    /// Returns whether the connector currently holds a live connection.
    #[must_use]
    pub fn has_live_connection(&self, id: ConnectorId) -> bool {
        self.connections.contains(id)
    }

    async fn find_or_error(&self, id: ConnectorId) -> ConnectorManagerResult<ConnectorInstance> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ConnectorManagerError::ConnectorNotFound(id))
    }

    fn definition_for_slug(&self, slug: &str) -> ConnectorManagerResult<&IntegrationDefinition> {
        self.catalog
            .get_by_id(slug)
            .ok_or_else(|| ConnectorManagerError::IntegrationNotFound(slug.to_owned()))
    }

    fn definition_for(
        &self,
        integration_id: &IntegrationId,
    ) -> ConnectorManagerResult<&IntegrationDefinition> {
        self.catalog
            .get(integration_id)
            .ok_or_else(|| ConnectorManagerError::IntegrationNotFound(integration_id.to_string()))
    }

    async fn reconnect_stored(
        &self,
        mut instance: ConnectorInstance,
    ) -> ConnectorManagerResult<ConnectorInstance> {
        let credentials = self.protector.reveal(instance.credentials())?;
        let outcome = self.reconnect_with(&mut instance, &credentials).await;
        if is_recorded(&outcome) {
            tracing::info!(
                connector_id = %instance.id(),
                status = %instance.status(),
                "connector reconnected"
            );
            self.emit(lifecycle_event(ConnectorEventKind::Updated, &instance, &*self.clock));
        }
        outcome.map(|()| instance)
    }

    /// Builds a fresh connection for `instance`, persists the resulting
    /// status, and swaps it into the live table.
    ///
    /// Caller holds the connector's write lock. On a connection failure the
    /// old handle is released as well, so the stored `error` status always
    /// matches an empty slot in the table.
    async fn reconnect_with(
        &self,
        instance: &mut ConnectorInstance,
        credentials: &Value,
    ) -> ConnectorManagerResult<()> {
        let id = instance.id();
        let factory = self.loader.resolve(instance.integration_id())?;
        let connection = match factory.build(instance.config(), credentials) {
            Ok(handle) => open_handle(handle).await,
            Err(err) => Err(err),
        };

        match connection {
            Ok(handle) => {
                instance.mark_active(&*self.clock);
                if let Err(err) = self.repository.update(instance).await {
                    close_handle(id, handle).await;
                    return Err(err.into());
                }
                if let Some(replaced) = self.connections.insert(id, handle) {
                    close_handle(id, replaced).await;
                }
                Ok(())
            }
            Err(source) => {
                instance.mark_error(source.to_string(), &*self.clock);
                self.repository.update(instance).await?;
                if let Some(released) = self.connections.remove(id) {
                    close_handle(id, released).await;
                }
                tracing::warn!(connector_id = %id, error = %source, "connection failed");
                Err(ConnectorManagerError::ConnectionFailed {
                    connector_id: id,
                    source,
                })
            }
        }
    }

    fn emit(&self, event: ConnectorEvent) {
        let kind = event.kind;
        let connector_id = event.connector_id;
        if let Err(err) = self.events.publish(event) {
            tracing::warn!(
                %connector_id,
                kind = kind.as_str(),
                error = %err,
                "connector event dropped"
            );
        }
    }
}

/// One action dispatch, owned by the task that performs it.
struct Dispatch {
    connector_id: ConnectorId,
    workspace_id: WorkspaceId,
    action: String,
    params: Value,
}

impl Dispatch {
    async fn run(
        self,
        handle: Arc<dyn Capability>,
        events: &dyn ConnectorEventSink,
        clock: &impl Clock,
    ) -> Result<Value, CapabilityError> {
        let Self {
            connector_id,
            workspace_id,
            action,
            params,
        } = self;

        let call_action = action.clone();
        let call_params = params.clone();
        let result = tokio::spawn(async move { handle.execute(&call_action, call_params).await })
            .await
            .unwrap_or_else(|join_error| Err(CapabilityError::Panicked(join_error.to_string())));

        let outcome = match &result {
            Ok(value) => ExecutionOutcome::Result(value.clone()),
            Err(err) => ExecutionOutcome::Error(err.to_string()),
        };
        let record = ExecutionRecord {
            connector_id,
            action,
            params,
            outcome,
            timestamp: clock.utc(),
        };
        if let Err(err) = events.publish(ConnectorEvent::from_execution(&record, workspace_id)) {
            tracing::warn!(
                %connector_id,
                action = %record.action,
                error = %err,
                "execution event dropped"
            );
        }
        match &result {
            Ok(_) => tracing::debug!(%connector_id, action = %record.action, "action executed"),
            Err(err) => {
                tracing::warn!(
                    %connector_id,
                    action = %record.action,
                    error = %err,
                    "action failed"
                );
            }
        }
        result
    }
}

fn validate_payloads(
    definition: &IntegrationDefinition,
    config: &Value,
    credentials: &Value,
) -> Result<(), SchemaViolation> {
    definition
        .config_schema()
        .validate(PayloadKind::Config, config)?;
    definition
        .credentials_schema()
        .validate(PayloadKind::Credentials, credentials)
}

async fn open_handle(handle: Arc<dyn Capability>) -> Result<Arc<dyn Capability>, CapabilityError> {
    handle.open().await?;
    Ok(handle)
}

async fn close_handle(id: ConnectorId, handle: Arc<dyn Capability>) {
    if let Err(err) = handle.close().await {
        tracing::warn!(connector_id = %id, error = %err, "failed to close live connection");
    }
}

fn lifecycle_event(
    kind: ConnectorEventKind,
    instance: &ConnectorInstance,
    clock: &impl Clock,
) -> ConnectorEvent {
    ConnectorEvent::new(
        kind,
        instance.id(),
        instance.workspace_id(),
        json!({
            "integration_id": instance.integration_id().as_str(),
            "name": instance.name().as_str(),
            "status": instance.status().as_str(),
            "status_message": instance.status_message(),
        }),
        clock,
    )
}

fn updated_event(
    instance: &ConnectorInstance,
    changed: &[&str],
    clock: &impl Clock,
) -> ConnectorEvent {
    let mut event = lifecycle_event(ConnectorEventKind::Updated, instance, clock);
    if let Value::Object(payload) = &mut event.payload {
        payload.insert("changed".to_owned(), json!(changed));
    }
    event
}

/// Whether a reconnect outcome left a new state in the repository.
const fn is_recorded(outcome: &ConnectorManagerResult<()>) -> bool {
    matches!(
        outcome,
        Ok(()) | Err(ConnectorManagerError::ConnectionFailed { .. })
    )
}
