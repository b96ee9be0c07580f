// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live ledger notifications for open dashboards.
//!
//! Events describe what already changed in the session. They are
//! informational only: clients re-read the HTTP API for authoritative data,
//! and nothing sent over the socket is ever executed.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use chrono::{NaiveDate, Utc};
use futures::{SinkExt, stream::StreamExt};
use planboard::LedgerChange;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live ledger event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A user was assigned or re-dated.
    AssignmentCommitted {
        /// The project.
        project_id: String,
        /// The user.
        user_id: String,
        /// First day.
        start_date: NaiveDate,
        /// Last day.
        end_date: NaiveDate,
    },
    /// A user was removed from a project.
    AssignmentRemoved {
        /// The project.
        project_id: String,
        /// The user.
        user_id: String,
    },
    /// Expired assignments were swept.
    AssignmentsReaped {
        /// How many were removed.
        count: usize,
    },
    /// Directory data was refreshed.
    DirectoryRefreshed {
        /// Users now cached.
        users: usize,
        /// Projects now cached.
        projects: usize,
        /// Fetches that failed.
        notices: usize,
    },
    /// The stored snapshot was replaced or cleared and the ledger reloaded.
    LedgerReloaded {
        /// Assignments after the reload.
        assignments: usize,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

impl LiveEvent {
    /// Describes a ledger change, or `None` when nothing changed.
    #[must_use]
    pub fn from_change(change: &LedgerChange) -> Option<Self> {
        match change {
            LedgerChange::Assigned { assignment, .. } => Some(Self::AssignmentCommitted {
                project_id: assignment.project_id.to_string(),
                user_id: assignment.user_id.to_string(),
                start_date: assignment.start_date,
                end_date: assignment.end_date,
            }),
            LedgerChange::Removed {
                removed: Some(assignment),
            } => Some(Self::AssignmentRemoved {
                project_id: assignment.project_id.to_string(),
                user_id: assignment.user_id.to_string(),
            }),
            LedgerChange::Reaped { removed } if !removed.is_empty() => {
                Some(Self::AssignmentsReaped {
                    count: removed.len(),
                })
            }
            LedgerChange::Removed { removed: None } | LedgerChange::Reaped { .. } => None,
        }
    }
}

/// Broadcaster for live ledger events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive change notifications.
#[derive(Debug, Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Events sent before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Upgrades the connection to a WebSocket and streams live events.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: Utc::now().to_rfc3339(),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize live event");
                }
            }
        }
    });

    // Clients have nothing to say; drain until they close.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use chrono::{TimeZone, Utc};
    use planboard_domain::{Assignment, ProjectId, UserId};

    fn create_test_assignment() -> Assignment {
        Assignment {
            project_id: ProjectId::new("p1").unwrap(),
            user_id: UserId::new("u1").unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
            assigned_at: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        broadcaster.broadcast(&LiveEvent::AssignmentsReaped { count: 1 });
    }

    #[test]
    fn test_multiple_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.broadcast(&LiveEvent::LedgerReloaded { assignments: 4 });

        assert_eq!(
            rx1.try_recv().unwrap(),
            LiveEvent::LedgerReloaded { assignments: 4 }
        );
        assert!(matches!(rx2.try_recv(), Ok(LiveEvent::LedgerReloaded { .. })));
    }

    #[test]
    fn test_assignment_change_becomes_committed_event() {
        let change = LedgerChange::Assigned {
            assignment: create_test_assignment(),
            replaced: None,
        };

        let event = LiveEvent::from_change(&change).unwrap();

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "assignment_committed");
        assert_eq!(json["project_id"], "p1");
        assert_eq!(json["end_date"], "2024-07-31");
    }

    #[test]
    fn test_no_op_changes_are_not_announced() {
        assert!(LiveEvent::from_change(&LedgerChange::Removed { removed: None }).is_none());
        assert!(LiveEvent::from_change(&LedgerChange::Reaped { removed: vec![] }).is_none());
        assert_eq!(
            LiveEvent::from_change(&LedgerChange::Reaped {
                removed: vec![create_test_assignment()],
            }),
            Some(LiveEvent::AssignmentsReaped { count: 1 })
        );
    }
}
