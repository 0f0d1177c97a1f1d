//! Event delivery through the bounded channel sink.

use std::sync::Arc;

use serde_json::json;
use switchyard::connector::{
    adapters::ChannelEventSink,
    domain::{ConnectorEventKind, WorkspaceId},
};

use super::helpers::{manager_with, slack_capability, slack_request};

#[tokio::test(flavor = "multi_thread")]
async fn events_stream_in_operation_order() -> Result<(), eyre::Report> {
    let (sink, mut stream) = ChannelEventSink::channel(16);
    let manager = manager_with(slack_capability(), Arc::new(sink));
    let created = manager
        .create_connector(slack_request(WorkspaceId::new(), "Team Slack"))
        .await?;
    manager
        .execute_action(created.id(), "sendMessage", json!({"text": "hello"}))
        .await?;
    manager.delete_connector(created.id()).await?;

    let mut kinds = Vec::new();
    while let Some(event) = stream.try_recv() {
        eyre::ensure!(event.connector_id == created.id(), "foreign event");
        kinds.push(event.kind);
    }
    eyre::ensure!(
        kinds
            == vec![
                ConnectorEventKind::Created,
                ConnectorEventKind::ActionExecuted,
                ConnectorEventKind::Deleted,
            ],
        "unexpected stream {kinds:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn full_queue_does_not_fail_operations() -> Result<(), eyre::Report> {
    let (sink, mut stream) = ChannelEventSink::channel(1);
    let manager = manager_with(slack_capability(), Arc::new(sink));
    let created = manager
        .create_connector(slack_request(WorkspaceId::new(), "Team Slack"))
        .await?;

    let echoed = manager
        .execute_action(created.id(), "sendMessage", json!({"text": "dropped"}))
        .await?;
    eyre::ensure!(echoed == json!({"text": "dropped"}), "unexpected echo");
    manager.delete_connector(created.id()).await?;

    let first = stream
        .try_recv()
        .ok_or_else(|| eyre::eyre!("expected the created event"))?;
    eyre::ensure!(
        first.kind == ConnectorEventKind::Created,
        "got {}",
        first.kind
    );
    eyre::ensure!(
        stream.try_recv().is_none(),
        "overflow events should be dropped"
    );
    Ok(())
}
