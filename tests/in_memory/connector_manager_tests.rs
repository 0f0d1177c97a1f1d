//! In-memory integration tests for the connector manager.

use std::sync::Arc;

use serde_json::json;
use switchyard::connector::{
    adapters::memory::RecordingEventSink,
    domain::{ConnectorEventKind, ConnectorStatus, WorkspaceId},
    services::{ConnectorErrorKind, UpdateConnectorRequest},
};

use super::helpers::{manager_with, slack_capability, slack_request};

#[tokio::test(flavor = "multi_thread")]
async fn connector_lifecycle_round_trip() -> Result<(), eyre::Report> {
    let events = RecordingEventSink::new();
    let manager = manager_with(slack_capability(), Arc::new(events.clone()));
    let workspace = WorkspaceId::new();

    let created = manager
        .create_connector(slack_request(workspace, "Team Slack"))
        .await?;
    eyre::ensure!(
        created.status() == ConnectorStatus::Active,
        "expected active"
    );

    let channels = manager
        .execute_action(created.id(), "listChannels", json!({}))
        .await?;
    eyre::ensure!(
        channels == json!({"channels": ["general"]}),
        "unexpected result"
    );

    let renamed = manager
        .update_connector(
            created.id(),
            UpdateConnectorRequest::new().with_name("Support Slack"),
        )
        .await?;
    eyre::ensure!(
        renamed.name().as_str() == "Support Slack",
        "rename not applied"
    );

    manager.delete_connector(created.id()).await?;
    eyre::ensure!(
        manager.get_connector(created.id()).await?.is_none(),
        "connector should be gone"
    );

    let kinds: Vec<ConnectorEventKind> = events.events().iter().map(|event| event.kind).collect();
    eyre::ensure!(
        kinds
            == vec![
                ConnectorEventKind::Created,
                ConnectorEventKind::ActionExecuted,
                ConnectorEventKind::Updated,
                ConnectorEventKind::Deleted,
            ],
        "unexpected event order: {kinds:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn workspaces_are_isolated() -> Result<(), eyre::Report> {
    let manager = manager_with(slack_capability(), Arc::new(RecordingEventSink::new()));
    let first = WorkspaceId::new();
    let second = WorkspaceId::new();

    manager.create_connector(slack_request(first, "Alpha")).await?;
    manager.create_connector(slack_request(first, "Beta")).await?;
    manager.create_connector(slack_request(second, "Gamma")).await?;

    let names: Vec<String> = manager
        .get_connectors_by_workspace(first)
        .await?
        .iter()
        .map(|instance| instance.name().as_str().to_owned())
        .collect();
    eyre::ensure!(names == ["Alpha", "Beta"], "unexpected listing {names:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivated_connectors_refuse_actions_until_reactivated() -> Result<(), eyre::Report> {
    let manager = manager_with(slack_capability(), Arc::new(RecordingEventSink::new()));
    let created = manager
        .create_connector(slack_request(WorkspaceId::new(), "Team Slack"))
        .await?;

    manager.deactivate_connector(created.id()).await?;
    let refused = manager
        .execute_action(created.id(), "sendMessage", json!({"text": "hi"}))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("inactive connector executed an action"))?;
    eyre::ensure!(
        refused.kind() == ConnectorErrorKind::Unavailable,
        "got {refused}"
    );

    let reactivated = manager.activate_connector(created.id()).await?;
    eyre::ensure!(
        reactivated.status() == ConnectorStatus::Active,
        "expected active"
    );
    let echoed = manager
        .execute_action(created.id(), "sendMessage", json!({"text": "hi"}))
        .await?;
    eyre::ensure!(echoed == json!({"text": "hi"}), "unexpected echo {echoed}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_actions_leave_the_connector_active() -> Result<(), eyre::Report> {
    let events = RecordingEventSink::new();
    let manager = manager_with(slack_capability(), Arc::new(events.clone()));
    let created = manager
        .create_connector(slack_request(WorkspaceId::new(), "Team Slack"))
        .await?;

    let failure = manager
        .execute_action(created.id(), "uploadFile", json!({"name": "big.iso"}))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected upload to fail"))?;
    eyre::ensure!(
        failure.kind() == ConnectorErrorKind::Connector,
        "got {failure}"
    );

    let stored = manager
        .get_connector(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("connector missing"))?;
    eyre::ensure!(stored.status() == ConnectorStatus::Active, "status changed");
    eyre::ensure!(
        events.events_of(ConnectorEventKind::ActionFailed).len() == 1,
        "expected one failure event"
    );
    Ok(())
}
