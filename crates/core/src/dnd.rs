// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Translation of drag gestures into pending assignments.
//!
//! A drop never mutates the ledger. A valid drop produces a
//! [`PendingAssignment`] that waits for dates; anything else is a silent
//! no-op.

use planboard_domain::{Project, ProjectId, User, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Droppable id prefix of a project's drop target.
pub const PROJECT_TARGET_PREFIX: &str = "project-";

/// Optional prefix on draggable user ids.
pub const USER_DRAGGABLE_PREFIX: &str = "user-";

/// The user lists a drag may start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropSource {
    /// Users with no assignment.
    AvailableUsers,
    /// Users with a current assignment.
    AssignedUsers,
    /// Users whose assignment ends soon.
    BecomingAvailableUsers,
}

impl DropSource {
    /// All valid sources.
    pub const ALL: [Self; 3] = [
        Self::AvailableUsers,
        Self::AssignedUsers,
        Self::BecomingAvailableUsers,
    ];

    /// Returns the droppable id of this list.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AvailableUsers => "available-users",
            Self::AssignedUsers => "assigned-users",
            Self::BecomingAvailableUsers => "becoming-available-users",
        }
    }

    /// Parses a droppable id. Unknown ids yield `None`.
    #[must_use]
    pub fn parse(droppable_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == droppable_id)
    }
}

/// A completed drag gesture as reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEvent {
    /// Droppable id of the list the drag started in.
    pub source: String,
    /// Droppable id the item was released over, if any.
    #[serde(default)]
    pub destination: Option<String>,
    /// Id of the dragged item.
    pub draggable_id: String,
}

/// A drop waiting for confirmed dates. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAssignment {
    /// The user being assigned.
    pub user: User,
    /// The target project.
    pub project: Project,
    /// The list the drag came from.
    pub source: DropSource,
}

/// Extracts the project id from a drop target id such as `project-10042`.
#[must_use]
pub fn parse_project_target(droppable_id: &str) -> Option<ProjectId> {
    droppable_id
        .strip_prefix(PROJECT_TARGET_PREFIX)
        .and_then(|id| ProjectId::new(id).ok())
}

/// Extracts the user id from a draggable id, tolerating a `user-` prefix.
#[must_use]
pub fn parse_draggable_user(draggable_id: &str) -> Option<UserId> {
    let raw: &str = draggable_id
        .strip_prefix(USER_DRAGGABLE_PREFIX)
        .unwrap_or(draggable_id);
    UserId::new(raw).ok()
}

/// Resolves a drag gesture against the known users and projects.
///
/// Returns `None` when the source list is not a user list, the destination
/// is missing or not a project target, or either side cannot be found.
#[must_use]
pub fn resolve_drop(
    event: &DragEvent,
    users: &[User],
    projects: &[Project],
) -> Option<PendingAssignment> {
    let Some(source) = DropSource::parse(&event.source) else {
        debug!(source = %event.source, "Ignoring drop from unknown list");
        return None;
    };
    let Some(project_id) = event.destination.as_deref().and_then(parse_project_target) else {
        debug!(destination = ?event.destination, "Ignoring drop outside a project");
        return None;
    };
    let user_id: UserId = parse_draggable_user(&event.draggable_id)?;

    let user: &User = users.iter().find(|u| u.id == user_id)?;
    let Some(project) = projects.iter().find(|p| p.id == project_id) else {
        debug!(project_id = %project_id, "Ignoring drop on unknown project");
        return None;
    };

    Some(PendingAssignment {
        user: user.clone(),
        project: project.clone(),
        source,
    })
}
