//! Error types for catalog construction and parsing.

use super::IntegrationId;
use thiserror::Error;

/// Errors returned while building the integration catalog.
///
/// Any of these at startup means the static catalog data is malformed and the
/// process must not serve a partially loaded catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The integration identifier is empty after trimming.
    #[error("integration id must not be empty")]
    EmptyIntegrationId,

    /// The integration identifier contains characters outside `[a-z0-9_-]`.
    #[error(
        "integration id '{0}' contains invalid characters (only lowercase alphanumeric, '-' and '_' allowed)"
    )]
    InvalidIntegrationId(String),

    /// The integration identifier exceeds the 64-character storage limit.
    #[error("integration id exceeds 64 character limit: {0}")]
    IntegrationIdTooLong(String),

    /// Two definitions share one identifier.
    #[error("duplicate integration definition: {0}")]
    DuplicateIntegration(IntegrationId),

    /// A definition declares no actions.
    #[error("integration {0} declares no actions")]
    NoDeclaredActions(IntegrationId),

    /// A definition has an empty display name.
    #[error("integration {0} has an empty name")]
    EmptyName(IntegrationId),

    /// One of the definition's payload schemas is malformed.
    #[error("integration {integration_id} has an invalid schema: {source}")]
    InvalidSchema {
        /// Integration whose schema failed validation.
        integration_id: IntegrationId,
        /// Underlying schema problem.
        #[source]
        source: PayloadSchemaError,
    },
}

/// Structural problems in a payload schema definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadSchemaError {
    /// A field name is empty after trimming.
    #[error("schema field name must not be empty")]
    EmptyFieldName,

    /// A field is declared twice.
    #[error("schema field '{0}' is declared more than once")]
    DuplicateField(String),

    /// A `select` field provides no options.
    #[error("select field '{0}' must provide options")]
    SelectWithoutOptions(String),
}

/// Error returned while parsing an integration category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown integration category: {0}")]
pub struct ParseIntegrationCategoryError(pub String);

/// Error returned while parsing an authentication scheme.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown authentication scheme: {0}")]
pub struct ParseAuthSchemeError(pub String);
