//! Integration categories and authentication schemes.

use super::{ParseAuthSchemeError, ParseIntegrationCategoryError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad grouping used to browse the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationCategory {
    /// Chat, email and messaging services.
    Communication,
    /// Customer relationship management.
    Crm,
    /// Payment processing and billing providers.
    Payments,
    /// Model providers and AI tooling.
    Ai,
    /// Documents, notes and office suites.
    Productivity,
    /// Source control and developer platforms.
    DeveloperTools,
    /// Marketing automation and campaigns.
    Marketing,
    /// File and object storage.
    Storage,
    /// Analytics and reporting.
    Analytics,
    /// Generic building blocks such as raw HTTP.
    Utility,
}

impl IntegrationCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Communication,
        Self::Crm,
        Self::Payments,
        Self::Ai,
        Self::Productivity,
        Self::DeveloperTools,
        Self::Marketing,
        Self::Storage,
        Self::Analytics,
        Self::Utility,
    ];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::Crm => "crm",
            Self::Payments => "payments",
            Self::Ai => "ai",
            Self::Productivity => "productivity",
            Self::DeveloperTools => "developer_tools",
            Self::Marketing => "marketing",
            Self::Storage => "storage",
            Self::Analytics => "analytics",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for IntegrationCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IntegrationCategory {
    type Error = ParseIntegrationCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseIntegrationCategoryError(value.to_owned()))
    }
}

/// How an integration authenticates against its remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// No credentials are required.
    None,
    /// A static API key.
    ApiKey,
    /// A bearer or bot token.
    BearerToken,
    /// Username and password.
    Basic,
    /// OAuth 2.0 client credentials or refresh tokens.
    Oauth2,
}

impl AuthScheme {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ApiKey => "api_key",
            Self::BearerToken => "bearer_token",
            Self::Basic => "basic",
            Self::Oauth2 => "oauth2",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AuthScheme {
    type Error = ParseAuthSchemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "none" => Ok(Self::None),
            "api_key" => Ok(Self::ApiKey),
            "bearer_token" => Ok(Self::BearerToken),
            "basic" => Ok(Self::Basic),
            "oauth2" => Ok(Self::Oauth2),
            _ => Err(ParseAuthSchemeError(value.to_owned())),
        }
    }
}
