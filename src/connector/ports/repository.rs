//! Repository port for connector instance persistence.

use crate::connector::domain::{ConnectorId, ConnectorInstance, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for connector repository operations.
pub type ConnectorRepositoryResult<T> = Result<T, ConnectorRepositoryError>;

/// Durable storage contract for connector instances.
#[async_trait]
pub trait ConnectorRepository: Send + Sync {
    /// Stores a new instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorRepositoryError::DuplicateConnector`] when the ID
    /// already exists.
    async fn insert(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()>;

    /// Persists changes to an existing instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorRepositoryError::NotFound`] when the instance does
    /// not exist.
    async fn update(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()>;

    /// Removes an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorRepositoryError::NotFound`] when the instance does
    /// not exist.
    async fn delete(&self, id: ConnectorId) -> ConnectorRepositoryResult<()>;

    /// Finds an instance by identifier.
    async fn find_by_id(&self, id: ConnectorId)
    -> ConnectorRepositoryResult<Option<ConnectorInstance>>;

    /// Returns the instances owned by a workspace, oldest first.
    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ConnectorRepositoryResult<Vec<ConnectorInstance>>;

    /// Returns every stored instance.
    async fn list_all(&self) -> ConnectorRepositoryResult<Vec<ConnectorInstance>>;
}

/// Errors returned by connector repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ConnectorRepositoryError {
    /// An instance with the same identifier already exists.
    #[error("duplicate connector identifier: {0}")]
    DuplicateConnector(ConnectorId),

    /// The instance was not found.
    #[error("connector not found: {0}")]
    NotFound(ConnectorId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted connector data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConnectorRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
