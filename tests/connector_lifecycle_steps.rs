//! Behaviour tests for connector creation, testing, execution, and deletion.

mod connector_steps;

use connector_steps::world::{ConnectorWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Create a Slack connector with a bot token"
)]
#[tokio::test(flavor = "multi_thread")]
async fn create_slack_connector(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Reject a configuration that does not match the schema"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_invalid_configuration(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Connection test succeeds for valid credentials"
)]
#[tokio::test(flavor = "multi_thread")]
async fn connection_test_succeeds(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Connection test reports rejected credentials"
)]
#[tokio::test(flavor = "multi_thread")]
async fn connection_test_reports_rejection(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Execute a declared action"
)]
#[tokio::test(flavor = "multi_thread")]
async fn execute_declared_action(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Reject an undeclared action"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reject_undeclared_action(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Report a failing action"
)]
#[tokio::test(flavor = "multi_thread")]
async fn report_failing_action(world: ConnectorWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/connector_lifecycle.feature",
    name = "Deleted connectors cannot execute actions"
)]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_connector_cannot_execute(world: ConnectorWorld) {
    let _ = world;
}
