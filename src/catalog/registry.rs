//! Immutable, indexed integration catalog.

use crate::catalog::builtin::builtin_definitions;
use crate::catalog::domain::{
    CatalogError, IntegrationCategory, IntegrationDefinition, IntegrationId,
};
use std::collections::HashMap;

/// Process-wide catalog of integration definitions.
///
/// Built once at startup and read-only afterwards; share it behind an `Arc`.
/// Iteration order follows the order definitions were supplied in, so it is
/// stable within a process run.
#[derive(Debug, Clone)]
pub struct IntegrationCatalog {
    definitions: Vec<IntegrationDefinition>,
    id_index: HashMap<IntegrationId, usize>,
}

impl IntegrationCatalog {
    /// Builds a catalog from supplied definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when any definition is invalid or two
    /// definitions share an identifier. No partial catalog is produced.
    pub fn new(
        definitions: impl IntoIterator<Item = IntegrationDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut ordered = Vec::new();
        let mut id_index = HashMap::new();
        for definition in definitions {
            definition.validate()?;
            if id_index.contains_key(definition.id()) {
                return Err(CatalogError::DuplicateIntegration(definition.id().clone()));
            }
            id_index.insert(definition.id().clone(), ordered.len());
            ordered.push(definition);
        }
        Ok(Self {
            definitions: ordered,
            id_index,
        })
    }

    /// Builds the catalog from the built-in definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the static data is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_definitions()?)
    }

    /// Returns every definition.
    #[must_use]
    pub fn get_all(&self) -> &[IntegrationDefinition] {
        &self.definitions
    }

    /// Looks up a definition by identifier.
    ///
    /// The query is normalised first; malformed or unknown identifiers yield
    /// `None`.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&IntegrationDefinition> {
        let parsed = IntegrationId::new(id).ok()?;
        self.get(&parsed)
    }

    /// Looks up a definition by validated identifier.
    #[must_use]
    pub fn get(&self, id: &IntegrationId) -> Option<&IntegrationDefinition> {
        self.id_index
            .get(id)
            .and_then(|position| self.definitions.get(*position))
    }

    /// Returns definitions in `category`.
    #[must_use]
    pub fn get_by_category(&self, category: IntegrationCategory) -> Vec<&IntegrationDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.category() == category)
            .collect()
    }

    /// Case-insensitive substring search across name, description, and
    /// feature tags.
    ///
    /// A blank query matches every definition.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&IntegrationDefinition> {
        let needle = query.trim().to_lowercase();
        self.definitions
            .iter()
            .filter(|definition| definition.matches_query(&needle))
            .collect()
    }

    /// Returns every identifier in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &IntegrationId> {
        self.definitions.iter().map(IntegrationDefinition::id)
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns whether the catalog has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
