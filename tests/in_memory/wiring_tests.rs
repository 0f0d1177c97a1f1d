//! Startup wiring: loader coverage, configuration, and credential keys.

use std::collections::HashMap;

use rstest::rstest;
use serde_json::json;
use switchyard::catalog::IntegrationCatalog;
use switchyard::config::{
    CREDENTIAL_KEY_ENV_ENV, EVENT_BUFFER_ENV, LOG_FILTER_ENV, SwitchyardConfig,
};
use switchyard::connector::{
    adapters::{
        AesGcmCredentialProtector, ChannelEventSink, ScriptedCapability, ScriptedCapabilityFactory,
    },
    ports::{CredentialProtectionError, CredentialProtector},
    services::ConnectorLoader,
};
use switchyard::telemetry::build_filter;

use super::helpers::catalog;

#[rstest]
fn loader_covering_every_builtin_passes(catalog: IntegrationCatalog) {
    let loader = catalog.ids().fold(ConnectorLoader::new(), |loader, id| {
        loader.with_factory(id.clone(), ScriptedCapabilityFactory::new(ScriptedCapability::new()))
    });

    assert_eq!(loader.ensure_covers(&catalog), Ok(()));
}

#[rstest]
fn configuration_drives_sink_filter_and_protector() {
    let environment = HashMap::from([
        (EVENT_BUFFER_ENV, "8"),
        (LOG_FILTER_ENV, "switchyard=debug"),
        (CREDENTIAL_KEY_ENV_ENV, "SWITCHYARD_INTEGRATION_TEST_KEY_NEVER_SET"),
    ]);
    let config = SwitchyardConfig::from_lookup(|name: &str| {
        environment.get(name).map(|value| (*value).to_owned())
    })
    .expect("configuration parses");

    assert_eq!(config.event_buffer_capacity, 8);
    assert!(build_filter(&config).is_ok());
    let (_sink, mut stream) = ChannelEventSink::channel(config.event_buffer_capacity);
    assert!(stream.try_recv().is_none());

    let protector =
        AesGcmCredentialProtector::from_config(&config).expect("missing key is tolerated");
    assert!(!protector.has_key());
    assert_eq!(
        protector.seal(&json!({"token": "secret"})).err(),
        Some(CredentialProtectionError::KeyUnavailable)
    );
}
