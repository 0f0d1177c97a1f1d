//! Tracing subscriber installation.

use crate::config::SwitchyardConfig;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive does not parse.
    #[error("invalid log filter {directive:?}: {source}")]
    InvalidFilter {
        /// Configured directive.
        directive: String,
        /// Parser failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the filter described by `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the directive does not
/// parse.
pub fn build_filter(config: &SwitchyardConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_filter).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_filter.clone(),
        source,
    })
}

/// Installs a global fmt subscriber filtered by `config.log_filter`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &SwitchyardConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;
    tracing::debug!(filter = %config.log_filter, "tracing initialised");
    Ok(())
}
