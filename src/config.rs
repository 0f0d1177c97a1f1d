//! Environment-driven runtime configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the event queue capacity.
pub const EVENT_BUFFER_ENV: &str = "SWITCHYARD_EVENT_BUFFER";

/// Environment variable overriding the log filter directive.
pub const LOG_FILTER_ENV: &str = "SWITCHYARD_LOG";

/// Environment variable naming the credential key variable.
pub const CREDENTIAL_KEY_ENV_ENV: &str = "SWITCHYARD_CREDENTIAL_KEY_ENV";

const DEFAULT_CREDENTIAL_KEY_ENV: &str = "SWITCHYARD_CREDENTIAL_KEY";
const DEFAULT_EVENT_BUFFER_CAPACITY: usize = 1024;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable held a value that could not be parsed.
    #[error("{variable} has invalid value {value:?}: {reason}")]
    InvalidValue {
        /// Offending variable.
        variable: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}

/// Runtime configuration for the connector subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchyardConfig {
    /// Name of the environment variable holding the base64 AES-256 key.
    pub credential_key_env: String,
    /// Capacity of the bounded event queue.
    pub event_buffer_capacity: usize,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for SwitchyardConfig {
    fn default() -> Self {
        Self {
            credential_key_env: DEFAULT_CREDENTIAL_KEY_ENV.to_owned(),
            event_buffer_capacity: DEFAULT_EVENT_BUFFER_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl SwitchyardConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a set variable cannot be
    /// parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let event_buffer_capacity = match read(EVENT_BUFFER_ENV) {
            Some(raw) => parse_capacity(&raw)?,
            None => defaults.event_buffer_capacity,
        };

        Ok(Self {
            credential_key_env: read(CREDENTIAL_KEY_ENV_ENV)
                .map_or(defaults.credential_key_env, |name| name.trim().to_owned()),
            event_buffer_capacity,
            log_filter: read(LOG_FILTER_ENV).unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        variable: EVENT_BUFFER_ENV,
        value: raw.to_owned(),
        reason,
    };
    let capacity = raw
        .trim()
        .parse::<usize>()
        .map_err(|err| invalid(err.to_string()))?;
    if capacity == 0 {
        return Err(invalid("capacity must be positive".to_owned()));
    }
    Ok(capacity)
}
