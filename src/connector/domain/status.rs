//! Connector lifecycle status.

use super::ParseConnectorStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a stored connector instance.
///
/// Every stored instance carries exactly one status. Deletion removes the
/// instance instead of recording a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorStatus {
    /// A live connection is open and actions may be dispatched.
    Active,
    /// The instance was deactivated and holds no live connection.
    Inactive,
    /// Opening the live connection failed.
    Error,
}

impl ConnectorStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns whether the instance is expected to hold a live connection.
    #[must_use]
    pub const fn expects_live_connection(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ConnectorStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ConnectorStatus {
    type Error = ParseConnectorStatusError;

    fn try_from(value: &str) -> Result<Self, ParseConnectorStatusError> {
        Self::parse(value).ok_or_else(|| ParseConnectorStatusError(value.to_owned()))
    }
}
