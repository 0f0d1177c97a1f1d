//! Table of live capability handles keyed by connector.

use crate::connector::{domain::ConnectorId, ports::Capability};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Process-local map from connector to its open capability.
///
/// Entries are only touched while the owning connector's write lock is held,
/// so the map lock is never contended for long.
#[derive(Default)]
pub struct LiveConnections {
    handles: RwLock<HashMap<ConnectorId, Arc<dyn Capability>>>,
}

impl LiveConnections {
    pub fn get(&self, id: ConnectorId) -> Option<Arc<dyn Capability>> {
        self.handles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: ConnectorId) -> bool {
        self.handles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Stores `handle`, returning the one it replaces.
    pub fn insert(
        &self,
        id: ConnectorId,
        handle: Arc<dyn Capability>,
    ) -> Option<Arc<dyn Capability>> {
        self.handles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, handle)
    }

    pub fn remove(&self, id: ConnectorId) -> Option<Arc<dyn Capability>> {
        self.handles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}
