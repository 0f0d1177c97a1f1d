//! Then steps for connector lifecycle BDD scenarios.

use super::world::{ConnectorWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::json;
use switchyard::connector::{domain::ConnectorStatus, services::ConnectorErrorKind};

#[then("the connector is active")]
fn connector_is_active(world: &ConnectorWorld) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connector in scenario world"))?;
    if connector.status() != ConnectorStatus::Active {
        return Err(eyre::eyre!("expected active, found {}", connector.status()));
    }
    if !world.manager.has_live_connection(connector.id()) {
        return Err(eyre::eyre!("active connector has no live connection"));
    }
    Ok(())
}

#[then(r#"the stored credentials do not contain "{secret}""#)]
fn stored_credentials_are_sealed(
    world: &ConnectorWorld,
    secret: String,
) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connector in scenario world"))?;
    let stored = run_async(world.manager.get_connector(connector.id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("connector was not stored"))?;
    let sealed = serde_json::to_string(stored.credentials())?;
    if sealed.contains(&secret) {
        return Err(eyre::eyre!("stored credentials contain the plaintext secret"));
    }
    Ok(())
}

#[then(r#"a "{kind}" event is recorded"#)]
fn event_is_recorded(world: &ConnectorWorld, kind: String) -> Result<(), eyre::Report> {
    let recorded = world
        .events
        .events()
        .iter()
        .any(|event| event.kind.as_str() == kind);
    if !recorded {
        return Err(eyre::eyre!("no {kind} event was recorded"));
    }
    Ok(())
}

#[then("creation fails with an invalid configuration error")]
fn creation_fails_with_invalid_configuration(world: &ConnectorWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_create_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected connector creation to fail"))?;
    if err.kind() != ConnectorErrorKind::InvalidConfiguration {
        return Err(eyre::eyre!("expected invalid configuration, got {err}"));
    }
    Ok(())
}

#[then("no connector is stored for the workspace")]
fn no_connector_stored(world: &ConnectorWorld) -> Result<(), eyre::Report> {
    let stored = run_async(world.manager.get_connectors_by_workspace(world.workspace))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    if !stored.is_empty() {
        return Err(eyre::eyre!("expected no connectors, found {}", stored.len()));
    }
    Ok(())
}

#[then("the connection test succeeds")]
fn connection_test_succeeds(world: &ConnectorWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connection test report"))?;
    if !report.success {
        return Err(eyre::eyre!("expected success, got {report:?}"));
    }
    Ok(())
}

#[then(r#"the connection test fails with "{message}""#)]
fn connection_test_fails(world: &ConnectorWorld, message: String) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connection test report"))?;
    if report.success || report.message.as_deref() != Some(message.as_str()) {
        return Err(eyre::eyre!("expected failure {message:?}, got {report:?}"));
    }
    Ok(())
}

#[then(r#"the action result echoes text "{text}""#)]
fn action_result_echoes(world: &ConnectorWorld, text: String) -> Result<(), eyre::Report> {
    let result = world
        .last_execution
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing execution result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("execution failed: {err}"))?;
    if result != &json!({ "channel": "#general", "text": text }) {
        return Err(eyre::eyre!("unexpected result {result}"));
    }
    Ok(())
}

#[then(r#"the action fails with a "{kind}" error"#)]
fn action_fails_with_kind(world: &ConnectorWorld, kind: String) -> Result<(), eyre::Report> {
    let execution = world
        .last_execution
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing execution result"))?;
    let Err(err) = execution else {
        return Err(eyre::eyre!("expected the action to fail"));
    };
    if format!("{:?}", err.kind()) != kind {
        return Err(eyre::eyre!("expected {kind} error, got {:?}: {err}", err.kind()));
    }
    Ok(())
}
