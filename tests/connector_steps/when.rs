//! When steps for connector lifecycle BDD scenarios.

use super::world::{ConnectorWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::{Value, json};
use switchyard::connector::services::CreateConnectorRequest;

#[when("the Slack connector is created")]
fn create_slack_connector(world: &mut ConnectorWorld) {
    let request = CreateConnectorRequest::new("slack", world.workspace, "Team Slack")
        .with_config(Value::Object(world.pending_config.clone()))
        .with_credentials(world.pending_credentials.clone());
    match run_async(world.manager.create_connector(request)) {
        Ok(created) => world.connector = Some(created),
        Err(err) => world.last_create_error = Some(err),
    }
}

#[when("the connector connection is tested")]
fn test_connector_connection(world: &mut ConnectorWorld) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connector in scenario world"))?;
    world.last_report = Some(run_async(world.manager.test_connector(connector.id())));
    Ok(())
}

#[when(r#"action "{action}" is executed with text "{text}""#)]
fn execute_action(
    world: &mut ConnectorWorld,
    action: String,
    text: String,
) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connector in scenario world"))?;
    world.last_execution = Some(run_async(world.manager.execute_action(
        connector.id(),
        &action,
        json!({ "channel": "#general", "text": text }),
    )));
    Ok(())
}

#[when("the connector is deleted")]
fn delete_connector(world: &mut ConnectorWorld) -> Result<(), eyre::Report> {
    let connector = world
        .connector
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing connector in scenario world"))?;
    run_async(world.manager.delete_connector(connector.id()))
        .map_err(|err| eyre::eyre!("delete failed: {err}"))
}
