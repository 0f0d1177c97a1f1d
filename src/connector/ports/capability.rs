//! Capability contract every connector implementation satisfies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Runtime object implementing one integration.
///
/// A capability is constructed from an instance's configuration and revealed
/// credentials, then bound to that instance as its live connection until it is
/// closed.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Performs a cheap reachability check against the remote service.
    ///
    /// Failures are reported through [`ConnectionCheck::invalid`]; this method
    /// has no error channel.
    async fn validate_connection(&self, config: &Value, credentials: &Value) -> ConnectionCheck;

    /// Performs the named action.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::UnsupportedOperation`] for action names the
    /// implementation does not handle and other variants for remote failures.
    async fn execute(&self, action: &str, params: Value) -> CapabilityResult<Value>;

    /// Describes limits and features used by callers for scheduling.
    fn descriptor(&self) -> CapabilityDescriptor;

    /// Establishes the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the connection cannot be opened.
    async fn open(&self) -> CapabilityResult<()> {
        Ok(())
    }

    /// Releases the underlying connection.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when release fails. Callers treat this as
    /// best-effort.
    async fn close(&self) -> CapabilityResult<()> {
        Ok(())
    }
}

/// Outcome of [`Capability::validate_connection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionCheck {
    /// Whether the remote service accepted the connection.
    pub valid: bool,
    /// Failure detail when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Optional implementation-specific diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ConnectionCheck {
    /// Creates a successful check.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            error: None,
            details: None,
        }
    }

    /// Creates a failed check with a reason.
    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            details: None,
        }
    }

    /// Attaches diagnostics.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Declared request budget for a remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per window.
    pub requests: u32,
    /// Window length in seconds.
    pub per_seconds: u32,
}

/// Static self-description of a capability.
///
/// The manager does not enforce these limits; it exposes them to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Declared rate limit, if the service publishes one.
    pub rate_limit: Option<RateLimit>,
    /// Maximum concurrent requests the implementation tolerates.
    pub max_concurrency: u32,
    /// Whether batch actions are supported.
    pub supports_batch: bool,
    /// Whether file payloads are supported.
    pub supports_files: bool,
}

impl Default for CapabilityDescriptor {
    fn default() -> Self {
        Self {
            rate_limit: None,
            max_concurrency: 1,
            supports_batch: false,
            supports_files: false,
        }
    }
}

/// Errors returned by capability implementations.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    /// The implementation does not handle the named action.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The remote service rejected the request.
    #[error("remote service rejected the request: {0}")]
    Rejected(String),

    /// The capability could not be constructed or opened.
    #[error("connection could not be established: {0}")]
    Connection(String),

    /// The capability call panicked.
    #[error("capability call panicked: {0}")]
    Panicked(String),

    /// Transport or implementation failure.
    #[error("capability runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl CapabilityError {
    /// Wraps a transport or implementation failure.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
