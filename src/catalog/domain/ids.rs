//! Stable slug identifier for integrations.

use super::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an integration identifier, matching `VARCHAR(64)`.
const MAX_INTEGRATION_ID_LENGTH: usize = 64;

/// Validated integration slug such as `slack` or `http_request`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntegrationId(String);

impl IntegrationId {
    /// Creates a validated integration identifier.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, CatalogError> {
        let normalized = value.into().trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(CatalogError::EmptyIntegrationId);
        }

        let is_valid = normalized.chars().all(|character| {
            character.is_ascii_lowercase()
                || character.is_ascii_digit()
                || character == '_'
                || character == '-'
        });
        if !is_valid {
            return Err(CatalogError::InvalidIntegrationId(normalized));
        }

        if normalized.len() > MAX_INTEGRATION_ID_LENGTH {
            return Err(CatalogError::IntegrationIdTooLong(normalized));
        }

        Ok(Self(normalized))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IntegrationId {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntegrationId> for String {
    fn from(value: IntegrationId) -> Self {
        value.0
    }
}

impl AsRef<str> for IntegrationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IntegrationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
