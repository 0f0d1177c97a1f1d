//! `PostgreSQL` adapters for connector instance persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ConnectorPgPool, PostgresConnectorRepository};
