// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ledger::Ledger;
use planboard_domain::{ProjectId, Timeline, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The persisted state of a session.
///
/// Serialized as `{"assignments": {...}, "timelines": {...}}` with
/// camelCase field names and `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The assignment ledger.
    #[serde(default)]
    pub assignments: Ledger,
    /// Last computed timeline per project.
    #[serde(default)]
    pub timelines: BTreeMap<ProjectId, Timeline>,
}

/// Counts describing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStats {
    /// Projects with at least one assignment.
    pub project_count: usize,
    /// Total assignments.
    pub assignment_count: usize,
    /// Distinct assigned users.
    pub user_count: usize,
    /// Projects with a stored timeline.
    pub timeline_count: usize,
}

impl Snapshot {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(assignments: Ledger, timelines: BTreeMap<ProjectId, Timeline>) -> Self {
        Self {
            assignments,
            timelines,
        }
    }

    /// Summarizes the snapshot.
    #[must_use]
    pub fn stats(&self) -> SnapshotStats {
        let users: BTreeSet<&UserId> = self.assignments.iter().map(|a| &a.user_id).collect();
        SnapshotStats {
            project_count: self.assignments.project_ids().count(),
            assignment_count: self.assignments.len(),
            user_count: users.len(),
            timeline_count: self.timelines.len(),
        }
    }
}
