// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use planboard::{FetchNotice, LedgerChange, SnapshotStats};
use planboard_domain::{Assignment, ProjectId, Timeline, UserId};
use planboard_persistence::StoreStats;
use serde::{Deserialize, Serialize};

/// Query parameters for the user and project panels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    /// Free-text filter; empty or absent matches everything.
    #[serde(default)]
    pub search: Option<String>,
}

/// Query parameters for a project's timeline grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimelineQuery {
    /// `day`, `week`, `month` or `year`; defaults to `day`.
    #[serde(default)]
    pub resolution: Option<String>,
}

/// API request describing a completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropRequest {
    /// Droppable id of the list the drag started in.
    pub source: String,
    /// Droppable id the item was released over.
    #[serde(default)]
    pub destination: Option<String>,
    /// Id of the dragged user.
    pub draggable_id: String,
}

/// The drop awaiting dates, as shown in the date-entry prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAssignmentInfo {
    /// The user being assigned.
    pub user_id: UserId,
    /// The user's display name.
    pub user_name: String,
    /// The target project.
    pub project_id: ProjectId,
    /// The project's display name.
    pub project_name: String,
    /// The list the drag started in.
    pub source: String,
    /// Bounds the entered dates must respect, when known.
    pub timeline: Option<Timeline>,
    /// Dates already held on this project, offered as defaults.
    pub current: Option<Assignment>,
}

/// API response for a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResponse {
    /// Whether the drop opened a pending assignment.
    pub accepted: bool,
    /// The pending assignment, when accepted.
    pub pending: Option<PendingAssignmentInfo>,
}

/// API request carrying raw date-entry input.
///
/// Used both to confirm a pending drop and to assign directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDatesRequest {
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: String,
}

/// API response for a committed ledger change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    /// What changed.
    pub change: LedgerChange,
    /// Set when the change is live but could not be saved.
    pub persist_warning: Option<String>,
    /// A success message.
    pub message: String,
}

/// API response for a cancelled drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPendingResponse {
    /// The user of the discarded drop.
    pub user_id: UserId,
    /// The project of the discarded drop.
    pub project_id: ProjectId,
}

/// API response for an expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReapResponse {
    /// Every assignment the sweep removed.
    pub removed: Vec<Assignment>,
    /// Set when the sweep is live but could not be saved.
    pub persist_warning: Option<String>,
}

/// API response for a directory refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Users now cached.
    pub user_count: usize,
    /// Projects now cached.
    pub project_count: usize,
    /// Number of projects whose timeline was recomputed.
    pub timelines_recomputed: usize,
    /// Fetches that failed and kept their previous data.
    pub notices: Vec<FetchNotice>,
    /// Set when recomputed timelines could not be saved.
    pub persist_warning: Option<String>,
}

/// API response for a snapshot import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Counts of the imported snapshot.
    pub imported: SnapshotStats,
    /// A success message.
    pub message: String,
}

/// API response for clearing the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    /// Whether a stored snapshot was deleted.
    pub cleared: bool,
    /// A success message.
    pub message: String,
}

/// API response describing the session and its store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Counts of the live session state.
    pub session: SnapshotStats,
    /// What the store currently holds.
    pub store: StoreStats,
    /// Users in the directory cache.
    pub directory_users: usize,
    /// Projects in the directory cache.
    pub directory_projects: usize,
    /// Whether a drop is awaiting dates.
    pub has_pending: bool,
}
