//! Per-connector reader/writer locks.

use crate::connector::domain::ConnectorId;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Lazily populated lock table.
///
/// Executions share the read side; anything that replaces or removes the
/// live connection takes the write side. Distinct connectors never contend.
#[derive(Default)]
pub struct InstanceLocks {
    locks: Mutex<HashMap<ConnectorId, Arc<RwLock<()>>>>,
}

impl InstanceLocks {
    fn lock_for(&self, id: ConnectorId) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    pub async fn read(&self, id: ConnectorId) -> OwnedRwLockReadGuard<()> {
        self.lock_for(id).read_owned().await
    }

    pub async fn write(&self, id: ConnectorId) -> OwnedRwLockWriteGuard<()> {
        self.lock_for(id).write_owned().await
    }

    /// Drops the table entry for a deleted connector.
    ///
    /// Waiters already holding the old lock still acquire it and then find
    /// the connector gone.
    pub fn forget(&self, id: ConnectorId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}
