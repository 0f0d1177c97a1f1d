//! Integration catalog for Switchyard.
//!
//! The catalog answers "what integrations exist and what do they require?".
//! It is built once at process start from static definitions, validated as a
//! whole, and never mutated afterwards, so reads need no locking.
//!
//! - Domain types in [`domain`]
//! - The immutable, indexed catalog in [`registry`]
//! - Process-start definitions in [`builtin`]

pub mod builtin;
pub mod domain;
pub mod registry;

pub use registry::IntegrationCatalog;
