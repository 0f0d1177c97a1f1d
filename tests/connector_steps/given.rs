//! Given steps for connector lifecycle BDD scenarios.

use super::world::{ConnectorWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::{Value, json};
use switchyard::connector::services::CreateConnectorRequest;

#[given(r#"a workspace with Slack credentials "{token}""#)]
fn workspace_with_slack_credentials(world: &mut ConnectorWorld, token: String) {
    world.pending_credentials = json!({ "token": token });
}

#[given(r#"the Slack configuration sets "{field}" to "{value}""#)]
fn slack_configuration_field(world: &mut ConnectorWorld, field: String, value: String) {
    world.pending_config.insert(field, Value::String(value));
}

#[given("an active Slack connector")]
fn active_slack_connector(world: &mut ConnectorWorld) -> Result<(), eyre::Report> {
    let request = CreateConnectorRequest::new("slack", world.workspace, "Team Slack")
        .with_credentials(json!({"token": "xoxb-test"}));
    let created = run_async(world.manager.create_connector(request))
        .wrap_err("create Slack connector for scenario")?;
    world.connector = Some(created);
    Ok(())
}
