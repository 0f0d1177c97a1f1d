//! Startup-time registration map from integration id to capability factory.

use crate::catalog::{IntegrationCatalog, domain::IntegrationId};
use crate::connector::ports::{Capability, CapabilityResult};
use serde_json::Value;
use std::{collections::HashMap, fmt, sync::Arc};
use thiserror::Error;

/// Constructs live capabilities for one integration.
pub trait CapabilityFactory: Send + Sync {
    /// Builds a capability from configuration and revealed credentials.
    ///
    /// # Errors
    ///
    /// Returns [`crate::connector::ports::CapabilityError`] when the
    /// implementation cannot be constructed from the supplied payloads.
    fn build(&self, config: &Value, credentials: &Value) -> CapabilityResult<Arc<dyn Capability>>;
}

impl<F> CapabilityFactory for F
where
    F: Fn(&Value, &Value) -> CapabilityResult<Arc<dyn Capability>> + Send + Sync,
{
    fn build(&self, config: &Value, credentials: &Value) -> CapabilityResult<Arc<dyn Capability>> {
        self(config, credentials)
    }
}

/// Errors returned by the connector loader.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoaderError {
    /// No implementation is registered for a catalog integration.
    #[error("no implementation registered for integration {0}")]
    ImplementationMissing(IntegrationId),

    /// Several catalog integrations lack an implementation.
    #[error("no implementation registered for integrations: {}", join_ids(.0))]
    ImplementationsMissing(Vec<IntegrationId>),
}

fn join_ids(ids: &[IntegrationId]) -> String {
    ids.iter()
        .map(IntegrationId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves integration ids to registered capability factories.
#[derive(Clone, Default)]
pub struct ConnectorLoader {
    factories: HashMap<IntegrationId, Arc<dyn CapabilityFactory>>,
}

impl ConnectorLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for `integration_id`, replacing any earlier entry.
    #[must_use]
    pub fn with_factory(
        mut self,
        integration_id: IntegrationId,
        factory: impl CapabilityFactory + 'static,
    ) -> Self {
        self.factories.insert(integration_id, Arc::new(factory));
        self
    }

    /// Returns the factory registered for `integration_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ImplementationMissing`] when nothing is
    /// registered under that id.
    pub fn resolve(
        &self,
        integration_id: &IntegrationId,
    ) -> Result<Arc<dyn CapabilityFactory>, LoaderError> {
        self.factories
            .get(integration_id)
            .map(Arc::clone)
            .ok_or_else(|| LoaderError::ImplementationMissing(integration_id.clone()))
    }

    /// Returns whether a factory is registered for `integration_id`.
    #[must_use]
    pub fn supports(&self, integration_id: &IntegrationId) -> bool {
        self.factories.contains_key(integration_id)
    }

    /// Returns the registered ids in sorted order.
    #[must_use]
    pub fn registered_ids(&self) -> Vec<IntegrationId> {
        let mut ids: Vec<_> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Checks that every catalog integration has a registered factory.
    ///
    /// Intended for startup, so that a catalog/loader mismatch stops the
    /// process instead of surfacing on first use.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::ImplementationsMissing`] listing every
    /// uncovered integration in catalog order.
    pub fn ensure_covers(&self, catalog: &IntegrationCatalog) -> Result<(), LoaderError> {
        let missing: Vec<_> = catalog
            .ids()
            .filter(|id| !self.supports(id))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoaderError::ImplementationsMissing(missing))
        }
    }
}

impl fmt::Debug for ConnectorLoader {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ConnectorLoader")
            .field("integrations", &self.registered_ids())
            .finish()
    }
}
