//! Connector instances and their lifecycle.
//!
//! A connector is a workspace-scoped, configured binding to one catalog
//! integration. This module stores connector instances with sealed
//! credentials, keeps one live capability handle per active connector, and
//! dispatches actions to it. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Loader and lifecycle orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
