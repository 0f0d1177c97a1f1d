//! Diesel row models for connector persistence.

use super::schema::connector_instances;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for connector instances.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = connector_instances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConnectorRow {
    /// Internal connector identifier.
    pub id: uuid::Uuid,
    /// Catalog integration identifier.
    pub integration_id: String,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Configuration payload.
    pub config: Value,
    /// Sealed credential payload.
    pub credentials: Value,
    /// Lifecycle status.
    pub status: String,
    /// Last connection error.
    pub status_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for connector instances.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connector_instances)]
pub struct NewConnectorRow {
    /// Internal connector identifier.
    pub id: uuid::Uuid,
    /// Catalog integration identifier.
    pub integration_id: String,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Configuration payload.
    pub config: Value,
    /// Sealed credential payload.
    pub credentials: Value,
    /// Lifecycle status.
    pub status: String,
    /// Last connection error.
    pub status_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for mutable connector columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = connector_instances)]
#[diesel(treat_none_as_null = true)]
pub struct ConnectorChangeset {
    /// Display name.
    pub name: String,
    /// Configuration payload.
    pub config: Value,
    /// Sealed credential payload.
    pub credentials: Value,
    /// Lifecycle status.
    pub status: String,
    /// Last connection error.
    pub status_message: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
