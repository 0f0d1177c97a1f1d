//! In-memory repository for connector instances.

use crate::connector::{
    domain::{ConnectorId, ConnectorInstance, WorkspaceId},
    ports::{ConnectorRepository, ConnectorRepositoryError, ConnectorRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory connector repository.
///
/// Suitable for tests and single-process deployments; contents do not survive
/// a restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectorRepository {
    state: Arc<RwLock<InMemoryRepositoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryRepositoryState {
    connectors: HashMap<ConnectorId, ConnectorInstance>,
}

impl InMemoryConnectorRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored instances.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn len(&self) -> ConnectorRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.connectors.len())
    }

    /// Returns whether the repository holds no instances.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn is_empty(&self) -> ConnectorRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn sorted_oldest_first(mut instances: Vec<ConnectorInstance>) -> Vec<ConnectorInstance> {
    instances.sort_by(|left, right| {
        left.created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().into_inner().cmp(&right.id().into_inner()))
    });
    instances
}

#[async_trait]
impl ConnectorRepository for InMemoryConnectorRepository {
    async fn insert(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if state.connectors.contains_key(&instance.id()) {
            return Err(ConnectorRepositoryError::DuplicateConnector(instance.id()));
        }

        state.connectors.insert(instance.id(), instance.clone());
        Ok(())
    }

    async fn update(&self, instance: &ConnectorInstance) -> ConnectorRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let stored = state
            .connectors
            .get_mut(&instance.id())
            .ok_or(ConnectorRepositoryError::NotFound(instance.id()))?;
        *stored = instance.clone();
        Ok(())
    }

    async fn delete(&self, id: ConnectorId) -> ConnectorRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        state
            .connectors
            .remove(&id)
            .map(|_| ())
            .ok_or(ConnectorRepositoryError::NotFound(id))
    }

    async fn find_by_id(
        &self,
        id: ConnectorId,
    ) -> ConnectorRepositoryResult<Option<ConnectorInstance>> {
        let state = self.state.read().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.connectors.get(&id).cloned())
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ConnectorRepositoryResult<Vec<ConnectorInstance>> {
        let state = self.state.read().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let owned = state
            .connectors
            .values()
            .filter(|instance| instance.workspace_id() == workspace_id)
            .cloned()
            .collect();
        Ok(sorted_oldest_first(owned))
    }

    async fn list_all(&self) -> ConnectorRepositoryResult<Vec<ConnectorInstance>> {
        let state = self.state.read().map_err(|err| {
            ConnectorRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(sorted_oldest_first(
            state.connectors.values().cloned().collect(),
        ))
    }
}
