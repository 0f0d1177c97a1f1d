//! Connector instance aggregate root.

use super::{ConnectorId, ConnectorName, ConnectorStatus, SealedCredentials, WorkspaceId};
use crate::catalog::domain::IntegrationId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::Value;

/// Parameter object for creating a connector instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConnectorInstance {
    /// Catalog integration the instance binds to.
    pub integration_id: IntegrationId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Validated display name.
    pub name: ConnectorName,
    /// Configuration payload, already validated against the integration.
    pub config: Value,
    /// Credentials, already sealed.
    pub credentials: SealedCredentials,
}

/// Workspace-scoped, configured binding to one integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorInstance {
    id: ConnectorId,
    integration_id: IntegrationId,
    workspace_id: WorkspaceId,
    name: ConnectorName,
    config: Value,
    credentials: SealedCredentials,
    status: ConnectorStatus,
    status_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing persisted connector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConnectorData {
    /// Persisted connector identifier.
    pub id: ConnectorId,
    /// Persisted integration identifier.
    pub integration_id: IntegrationId,
    /// Persisted owning workspace.
    pub workspace_id: WorkspaceId,
    /// Persisted display name.
    pub name: ConnectorName,
    /// Persisted configuration payload.
    pub config: Value,
    /// Persisted sealed credentials.
    pub credentials: SealedCredentials,
    /// Persisted lifecycle status.
    pub status: ConnectorStatus,
    /// Persisted status detail.
    pub status_message: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ConnectorInstance {
    /// Creates a new `active` connector instance.
    #[must_use]
    pub fn new(data: NewConnectorInstance, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ConnectorId::new(),
            integration_id: data.integration_id,
            workspace_id: data.workspace_id,
            name: data.name,
            config: data.config,
            credentials: data.credentials,
            status: ConnectorStatus::Active,
            status_message: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an instance from persistence.
    #[must_use]
    pub fn from_persisted(data: PersistedConnectorData) -> Self {
        Self {
            id: data.id,
            integration_id: data.integration_id,
            workspace_id: data.workspace_id,
            name: data.name,
            config: data.config,
            credentials: data.credentials,
            status: data.status,
            status_message: data.status_message,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the connector identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectorId {
        self.id
    }

    /// Returns the bound integration identifier.
    #[must_use]
    pub const fn integration_id(&self) -> &IntegrationId {
        &self.integration_id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ConnectorName {
        &self.name
    }

    /// Returns the configuration payload.
    #[must_use]
    pub const fn config(&self) -> &Value {
        &self.config
    }

    /// Returns the sealed credentials.
    #[must_use]
    pub const fn credentials(&self) -> &SealedCredentials {
        &self.credentials
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ConnectorStatus {
        self.status
    }

    /// Returns the detail recorded with the last status change, if any.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the instance.
    pub fn rename(&mut self, name: ConnectorName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Replaces the configuration payload.
    pub fn replace_config(&mut self, config: Value, clock: &impl Clock) {
        self.config = config;
        self.touch(clock);
    }

    /// Replaces the sealed credentials.
    pub fn replace_credentials(&mut self, credentials: SealedCredentials, clock: &impl Clock) {
        self.credentials = credentials;
        self.touch(clock);
    }

    /// Marks the instance as holding a live connection.
    pub fn mark_active(&mut self, clock: &impl Clock) {
        self.set_status(ConnectorStatus::Active, None, clock);
    }

    /// Marks the instance as deactivated.
    pub fn mark_inactive(&mut self, clock: &impl Clock) {
        self.set_status(ConnectorStatus::Inactive, None, clock);
    }

    /// Marks the instance as failed with a diagnostic message.
    pub fn mark_error(&mut self, message: impl Into<String>, clock: &impl Clock) {
        let normalized = message.into().trim().to_owned();
        let detail = (!normalized.is_empty()).then_some(normalized);
        self.set_status(ConnectorStatus::Error, detail, clock);
    }

    fn set_status(
        &mut self,
        status: ConnectorStatus,
        message: Option<String>,
        clock: &impl Clock,
    ) {
        self.status = status;
        self.status_message = message;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
