//! Shared world state for catalog browsing BDD scenarios.

use rstest::fixture;
use switchyard::catalog::{IntegrationCatalog, domain::IntegrationDefinition};

/// Scenario world for catalog browsing behaviour tests.
#[derive(Default)]
pub struct CatalogWorld {
    pub catalog: Option<IntegrationCatalog>,
    pub looked_up: Option<Option<IntegrationDefinition>>,
    pub results: Vec<IntegrationDefinition>,
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CatalogWorld {
    CatalogWorld::default()
}

impl CatalogWorld {
    /// Returns the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when no catalog was loaded by a given step.
    pub fn catalog(&self) -> Result<&IntegrationCatalog, eyre::Report> {
        self.catalog
            .as_ref()
            .ok_or_else(|| eyre::eyre!("catalog was not loaded"))
    }
}
