//! Integration definition value type.

use super::{AuthScheme, CatalogError, IntegrationCategory, IntegrationId, PayloadSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Static description of one third-party integration.
///
/// Definitions are assembled at process start and checked by
/// [`IntegrationDefinition::validate`] before the catalog accepts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationDefinition {
    id: IntegrationId,
    name: String,
    description: String,
    category: IntegrationCategory,
    version: String,
    auth: AuthScheme,
    #[serde(default)]
    features: Vec<String>,
    config_schema: PayloadSchema,
    credentials_schema: PayloadSchema,
    declared_actions: BTreeSet<String>,
}

impl IntegrationDefinition {
    /// Creates a definition with empty schemas and no declared actions.
    #[must_use]
    pub fn new(
        id: IntegrationId,
        name: impl Into<String>,
        category: IntegrationCategory,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            version: version.into(),
            auth: AuthScheme::None,
            features: Vec::new(),
            config_schema: PayloadSchema::empty(),
            credentials_schema: PayloadSchema::empty(),
            declared_actions: BTreeSet::new(),
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub const fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the feature tags used by catalog search.
    #[must_use]
    pub fn with_features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the configuration schema.
    #[must_use]
    pub fn with_config_schema(mut self, schema: PayloadSchema) -> Self {
        self.config_schema = schema;
        self
    }

    /// Sets the credentials schema.
    #[must_use]
    pub fn with_credentials_schema(mut self, schema: PayloadSchema) -> Self {
        self.credentials_schema = schema;
        self
    }

    /// Adds declared action names.
    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.declared_actions
            .extend(actions.into_iter().map(Into::into));
        self
    }

    /// Returns the integration identifier.
    #[must_use]
    pub const fn id(&self) -> &IntegrationId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> IntegrationCategory {
        self.category
    }

    /// Returns the definition version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the authentication scheme.
    #[must_use]
    pub const fn auth(&self) -> AuthScheme {
        self.auth
    }

    /// Returns the feature tags.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the configuration schema.
    #[must_use]
    pub const fn config_schema(&self) -> &PayloadSchema {
        &self.config_schema
    }

    /// Returns the credentials schema.
    #[must_use]
    pub const fn credentials_schema(&self) -> &PayloadSchema {
        &self.credentials_schema
    }

    /// Returns the declared action names in sorted order.
    #[must_use]
    pub const fn declared_actions(&self) -> &BTreeSet<String> {
        &self.declared_actions
    }

    /// Returns whether `action` is declared by this integration.
    #[must_use]
    pub fn declares_action(&self, action: &str) -> bool {
        self.declared_actions.contains(action)
    }

    /// Returns whether `needle` (already lowercased) occurs in the name,
    /// description, or any feature tag.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .features
                .iter()
                .any(|feature| feature.to_lowercase().contains(needle))
    }

    /// Checks the definition's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the name is blank, no actions are
    /// declared, or either schema is malformed.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(self.id.clone()));
        }
        if self.declared_actions.is_empty() {
            return Err(CatalogError::NoDeclaredActions(self.id.clone()));
        }
        for schema in [&self.config_schema, &self.credentials_schema] {
            schema
                .validate_definition()
                .map_err(|source| CatalogError::InvalidSchema {
                    integration_id: self.id.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::{FieldSpec, FieldType, PayloadSchemaError};

    fn slack_id() -> IntegrationId {
        IntegrationId::new("slack").expect("valid integration id")
    }

    fn bare_slack() -> IntegrationDefinition {
        IntegrationDefinition::new(
            slack_id(),
            "Slack",
            IntegrationCategory::Communication,
            "1.0.0",
        )
    }

    #[test]
    fn definition_without_actions_is_invalid() {
        let definition = bare_slack();
        assert_eq!(
            definition.validate(),
            Err(CatalogError::NoDeclaredActions(slack_id()))
        );
    }

    #[test]
    fn definition_with_malformed_schema_is_invalid() {
        let definition = bare_slack()
            .with_actions(["sendMessage"])
            .with_config_schema(
                PayloadSchema::empty().with_field(FieldSpec::required("", FieldType::String)),
            );
        assert_eq!(
            definition.validate(),
            Err(CatalogError::InvalidSchema {
                integration_id: slack_id(),
                source: PayloadSchemaError::EmptyFieldName,
            })
        );
    }

    #[test]
    fn query_matching_covers_name_description_and_features() {
        let definition = bare_slack()
            .with_description("Team messaging")
            .with_features(["Channels", "Threads"])
            .with_actions(["sendMessage"]);

        assert!(definition.matches_query("slack"));
        assert!(definition.matches_query("messaging"));
        assert!(definition.matches_query("thread"));
        assert!(!definition.matches_query("invoice"));
    }
}
