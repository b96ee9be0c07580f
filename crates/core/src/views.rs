// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read models handed to the presentation layer.
//!
//! Every view is rebuilt from the ledger and directory caches on each read.

use crate::ledger::EndingSoonUser;
use chrono::NaiveDate;
use planboard_domain::{
    Assignment, AssignmentStatus, Column, Project, ProjectId, Resolution, Timeline, User, UserId,
};
use serde::Serialize;

/// The three user lists of the staffing panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPanels {
    /// Users with no assignment.
    pub available: Vec<User>,
    /// Users with at least one current assignment.
    pub assigned: Vec<User>,
    /// Users becoming available within the ending-soon window.
    pub ending_soon: Vec<EndingSoonUser>,
}

/// One project as shown in the project panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    /// The project.
    pub project: Project,
    /// Its resolved timeline; `None` renders as "TBD".
    pub timeline: Option<Timeline>,
    /// Number of epics loaded for the project.
    pub epic_count: usize,
    /// The project's assignments in insertion order.
    pub assignments: Vec<Assignment>,
}

/// Projects split by whether any epic has been loaded for them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPanels {
    /// Projects with at least one epic.
    pub active: Vec<ProjectCard>,
    /// Projects with no epics yet.
    pub upcoming: Vec<ProjectCard>,
}

/// One assignment bar on a project timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    /// The assigned user.
    pub user_id: UserId,
    /// Display name, when the directory knows the user.
    pub user_name: Option<String>,
    /// First day of the assignment.
    pub start_date: NaiveDate,
    /// Last day of the assignment.
    pub end_date: NaiveDate,
    /// Status on the evaluated day.
    pub status: AssignmentStatus,
    /// Per-column activity flags.
    pub active: Vec<bool>,
}

/// A project's calendar grid with its assignment bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    /// The project shown.
    pub project_id: ProjectId,
    /// The project's display name.
    pub project_name: String,
    /// The project's resolved timeline.
    pub timeline: Option<Timeline>,
    /// Grid resolution.
    pub resolution: Resolution,
    /// Grid columns; empty when no range could be determined.
    pub columns: Vec<Column>,
    /// Activity flags of the project timeline itself.
    pub project_row: Vec<bool>,
    /// One row per assignment.
    pub rows: Vec<TimelineRow>,
}

/// One of a user's assignments with its derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignmentEntry {
    /// The assignment.
    pub assignment: Assignment,
    /// The project's display name, when known.
    pub project_name: Option<String>,
    /// Status on the evaluated day.
    pub status: AssignmentStatus,
    /// Days from the evaluated day to the end date; negative once expired.
    pub days_remaining: i64,
}

/// The user details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignments {
    /// The user id asked for.
    pub user_id: UserId,
    /// The directory record, if the user is known.
    pub user: Option<User>,
    /// Assignments, earliest start first.
    pub assignments: Vec<UserAssignmentEntry>,
}
