//! Switchyard: integration catalog and connector lifecycle core.
//!
//! This crate answers which third-party integrations exist and what they
//! require, and manages workspace-scoped connector instances bound to them:
//! validated configuration, sealed credentials, one live connection per
//! active connector, and action dispatch with lifecycle events.
//!
//! # Architecture
//!
//! Switchyard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, crypto, events)
//!
//! # Modules
//!
//! - [`catalog`]: Static integration definitions and lookup
//! - [`connector`]: Connector instances, capabilities, and lifecycle
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber installation

pub mod catalog;
pub mod config;
pub mod connector;
pub mod telemetry;
