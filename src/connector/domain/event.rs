//! Lifecycle and execution events emitted by the connector manager.

use super::{ConnectorId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Kind of connector event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorEventKind {
    /// A connector instance was created.
    #[serde(rename = "connector:created")]
    Created,
    /// A connector instance was updated.
    #[serde(rename = "connector:updated")]
    Updated,
    /// A connector instance was deleted.
    #[serde(rename = "connector:deleted")]
    Deleted,
    /// An action completed successfully.
    #[serde(rename = "action:executed")]
    ActionExecuted,
    /// An action failed.
    #[serde(rename = "action:failed")]
    ActionFailed,
}

impl ConnectorEventKind {
    /// Returns the wire name of the event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "connector:created",
            Self::Updated => "connector:updated",
            Self::Deleted => "connector:deleted",
            Self::ActionExecuted => "action:executed",
            Self::ActionFailed => "action:failed",
        }
    }
}

impl fmt::Display for ConnectorEventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Result half of an execution record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Value returned by the capability.
    Result(Value),
    /// Failure message reported by the capability.
    Error(String),
}

/// Record of one action dispatch, carried as the payload of action events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Connector the action ran against.
    pub connector_id: ConnectorId,
    /// Action name.
    pub action: String,
    /// Parameters passed to the action.
    pub params: Value,
    /// Result or error.
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
    /// Completion time.
    pub timestamp: DateTime<Utc>,
}

impl ExecutionRecord {
    /// Returns whether the action succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Result(_))
    }
}

/// Event delivered to external observers such as audit or telemetry.
///
/// Payloads never contain credentials in plain or sealed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorEvent {
    /// Event type.
    #[serde(rename = "type")]
    pub kind: ConnectorEventKind,
    /// Connector the event concerns.
    pub connector_id: ConnectorId,
    /// Workspace owning the connector.
    pub workspace_id: WorkspaceId,
    /// Emission time.
    pub timestamp: DateTime<Utc>,
    /// Event-specific data.
    pub payload: Value,
}

impl ConnectorEvent {
    /// Creates an event stamped with the supplied clock.
    #[must_use]
    pub fn new(
        kind: ConnectorEventKind,
        connector_id: ConnectorId,
        workspace_id: WorkspaceId,
        payload: Value,
        clock: &impl Clock,
    ) -> Self {
        Self {
            kind,
            connector_id,
            workspace_id,
            timestamp: clock.utc(),
            payload,
        }
    }

    /// Creates an `action:executed` or `action:failed` event from a record.
    #[must_use]
    pub fn from_execution(record: &ExecutionRecord, workspace_id: WorkspaceId) -> Self {
        let kind = if record.succeeded() {
            ConnectorEventKind::ActionExecuted
        } else {
            ConnectorEventKind::ActionFailed
        };
        let payload = serde_json::to_value(record).unwrap_or_else(|_| {
            json!({
                "action": record.action,
                "succeeded": record.succeeded(),
            })
        });
        Self {
            kind,
            connector_id: record.connector_id,
            workspace_id,
            timestamp: record.timestamp,
            payload,
        }
    }
}
