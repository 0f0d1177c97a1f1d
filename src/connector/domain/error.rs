//! Error types for connector domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing connector domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorDomainError {
    /// The connector name is empty after trimming.
    #[error("connector name must not be empty")]
    EmptyConnectorName,

    /// The connector name exceeds the 255-character storage limit.
    #[error("connector name exceeds 255 character limit")]
    ConnectorNameTooLong,
}

/// Error returned while parsing connector status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown connector status: {0}")]
pub struct ParseConnectorStatusError(pub String);
