//! Domain model for integration definitions.
//!
//! An integration definition describes one third-party service: its identity,
//! the schemas its connector instances must satisfy, and the actions it
//! declares. Definitions are plain values; indexing lives in the registry.

mod category;
mod definition;
mod error;
mod ids;
mod schema;

pub use category::{AuthScheme, IntegrationCategory};
pub use definition::IntegrationDefinition;
pub use error::{
    CatalogError, ParseAuthSchemeError, ParseIntegrationCategoryError, PayloadSchemaError,
};
pub use ids::IntegrationId;
pub use schema::{
    FieldSpec, FieldType, PayloadKind, PayloadSchema, SchemaViolation, ViolationReason,
};
