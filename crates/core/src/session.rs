// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The planning session.
//!
//! A [`Session`] exclusively owns the ledger, the directory caches, the
//! computed timelines and the pending drop. It is created from a snapshot
//! store when the application starts and dropped when it ends.
//!
//! ## Invariants
//!
//! - Every ledger mutation goes through [`apply`]; a failed transition
//!   leaves the session untouched
//! - A successful mutation is visible immediately, and the snapshot write
//!   is issued before the call returns
//! - A failed snapshot write never rolls back the in-memory ledger; it is
//!   reported through [`CommitOutcome::persist_warning`]
//! - Failed fetches never clear cached directory data

use crate::apply::apply;
use crate::command::Command;
use crate::directory::{DirectoryFetch, FetchNotice};
use crate::dnd::{DragEvent, PendingAssignment, resolve_drop};
use crate::error::CoreError;
use crate::ledger::Ledger;
use crate::snapshot::Snapshot;
use crate::state::{LedgerChange, TransitionResult};
use crate::store::SnapshotStore;
use crate::views::{
    ProjectCard, ProjectPanels, TimelineRow, TimelineView, UserAssignmentEntry, UserAssignments,
    UserPanels,
};
use chrono::{DateTime, NaiveDate, Utc};
use planboard_domain::{
    Assignment, AssignmentStatus, Column, Epic, Project, ProjectId, Resolution, Timeline, User,
    UserId, activity_row, compute_project_timeline, generate_columns, parse_assignment_dates,
    resolve_project_timeline, search_projects, search_users, validate_assignment_dates,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// The result of a committed ledger change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitOutcome {
    /// What changed.
    pub change: LedgerChange,
    /// Set when the change could not be written to the snapshot store.
    pub persist_warning: Option<String>,
}

/// The result of applying a directory refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    /// Fetches that failed and kept their previous data.
    pub notices: Vec<FetchNotice>,
    /// Number of projects whose timeline was recomputed.
    pub timelines_recomputed: usize,
    /// Set when recomputed timelines could not be written.
    pub persist_warning: Option<String>,
}

/// An explicitly owned planning session.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    store: S,
    ledger: Ledger,
    users: Vec<User>,
    projects: Vec<Project>,
    epics: BTreeMap<ProjectId, Vec<Epic>>,
    timelines: BTreeMap<ProjectId, Timeline>,
    pending: Option<PendingAssignment>,
}

impl<S: SnapshotStore> Session<S> {
    /// Opens a session from the last saved snapshot.
    ///
    /// An empty store yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(mut store: S) -> Result<Self, S::Error> {
        let snapshot: Snapshot = store.load_snapshot()?.unwrap_or_default();
        info!(
            assignments = snapshot.assignments.len(),
            timelines = snapshot.timelines.len(),
            "Opened planning session"
        );
        Ok(Self {
            store,
            ledger: snapshot.assignments,
            users: Vec::new(),
            projects: Vec::new(),
            epics: BTreeMap::new(),
            timelines: snapshot.timelines,
            pending: None,
        })
    }

    /// Replaces the ledger and timelines with the store's current snapshot.
    ///
    /// Any pending drop is discarded. Directory caches are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read; the session is unchanged.
    pub fn reload(&mut self) -> Result<(), S::Error> {
        let snapshot: Snapshot = self.store.load_snapshot()?.unwrap_or_default();
        self.ledger = snapshot.assignments;
        self.timelines = snapshot.timelines;
        self.pending = None;
        info!(assignments = self.ledger.len(), "Reloaded planning session");
        Ok(())
    }

    /// Applies the results of a directory fetch.
    ///
    /// Lists that failed to fetch keep their previous contents. Every epic
    /// list that arrived triggers a timeline recomputation. A fresh project
    /// list drops the timelines of projects no longer in it.
    pub fn apply_fetch(&mut self, fetch: DirectoryFetch) -> RefreshOutcome {
        if let Some(users) = fetch.users {
            self.users = users;
        }
        let mut timelines_pruned: usize = 0;
        if let Some(projects) = fetch.projects {
            let before: usize = self.timelines.len();
            self.timelines
                .retain(|project_id, _| projects.iter().any(|p| &p.id == project_id));
            timelines_pruned = before - self.timelines.len();
            self.projects = projects;
        }

        let timelines_recomputed: usize = fetch.epics.len();
        for (project_id, epics) in fetch.epics {
            self.set_project_epics(project_id, epics);
        }

        let persist_warning: Option<String> = if timelines_recomputed > 0 || timelines_pruned > 0 {
            self.persist()
        } else {
            None
        };

        info!(
            users = self.users.len(),
            projects = self.projects.len(),
            timelines_recomputed,
            timelines_pruned,
            notices = fetch.notices.len(),
            "Applied directory refresh"
        );

        RefreshOutcome {
            notices: fetch.notices,
            timelines_recomputed,
            persist_warning,
        }
    }

    /// Stores a project's freshly loaded epics and recomputes its timeline.
    ///
    /// Returns the new computed timeline, if any.
    pub fn set_project_epics(&mut self, project_id: ProjectId, epics: Vec<Epic>) -> Option<Timeline> {
        let computed: Option<Timeline> = compute_project_timeline(&epics);
        match computed {
            Some(timeline) => {
                self.timelines.insert(project_id.clone(), timeline);
            }
            None => {
                self.timelines.remove(&project_id);
            }
        }
        debug!(
            project_id = %project_id,
            epic_count = epics.len(),
            has_timeline = computed.is_some(),
            "Recomputed project timeline"
        );
        self.epics.insert(project_id, epics);
        computed
    }

    /// Returns the cached users.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the cached projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the drop awaiting dates, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingAssignment> {
        self.pending.as_ref()
    }

    /// Returns the snapshot store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the snapshot store mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Looks up a cached project.
    #[must_use]
    pub fn project(&self, project_id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == project_id)
    }

    /// Looks up a cached user.
    #[must_use]
    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == user_id)
    }

    /// Returns the timeline shown for a project: computed from epics when
    /// possible, otherwise the project's declared dates.
    #[must_use]
    pub fn project_timeline(&self, project_id: &ProjectId) -> Option<Timeline> {
        let computed: Option<Timeline> = self.timelines.get(project_id).copied();
        match self.project(project_id) {
            Some(project) => resolve_project_timeline(computed, project),
            None => computed,
        }
    }

    /// Builds the three user lists, filtered by `search`.
    #[must_use]
    pub fn user_panels(&self, search: &str, today: NaiveDate) -> UserPanels {
        let matching: Vec<User> = search_users(&self.users, search)
            .into_iter()
            .cloned()
            .collect();

        UserPanels {
            available: self
                .ledger
                .available_users(&matching)
                .into_iter()
                .cloned()
                .collect(),
            assigned: self
                .ledger
                .assigned_users(&matching, today)
                .into_iter()
                .cloned()
                .collect(),
            ending_soon: self.ledger.ending_soon(&matching, today),
        }
    }

    /// Builds the project panel, filtered by `search`.
    #[must_use]
    pub fn project_panels(&self, search: &str) -> ProjectPanels {
        let mut panels: ProjectPanels = ProjectPanels::default();
        for project in search_projects(&self.projects, search) {
            let epic_count: usize = self.epics.get(&project.id).map_or(0, Vec::len);
            let card: ProjectCard = ProjectCard {
                project: project.clone(),
                timeline: self.project_timeline(&project.id),
                epic_count,
                assignments: self.ledger.assignments_for_project(&project.id).to_vec(),
            };
            if epic_count > 0 {
                panels.active.push(card);
            } else {
                panels.upcoming.push(card);
            }
        }
        panels
    }

    /// Handles a drag gesture.
    ///
    /// A valid drop replaces any earlier pending drop. An invalid one leaves
    /// the session unchanged and returns `None`.
    pub fn on_drop(&mut self, event: &DragEvent) -> Option<&PendingAssignment> {
        let pending: PendingAssignment = resolve_drop(event, &self.users, &self.projects)?;
        info!(
            user_id = %pending.user.id,
            project_id = %pending.project.id,
            source = pending.source.as_str(),
            "Drop awaiting dates"
        );
        self.pending = Some(pending);
        self.pending.as_ref()
    }

    /// Confirms the pending drop with raw date-entry input.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is pending or the dates fail validation.
    /// On error the pending drop stays open for correction.
    pub fn confirm_pending(
        &mut self,
        start_date: &str,
        end_date: &str,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, CoreError> {
        let pending: &PendingAssignment =
            self.pending.as_ref().ok_or(CoreError::NoPendingAssignment)?;
        let project_id: ProjectId = pending.project.id.clone();
        let user_id: UserId = pending.user.id.clone();

        let timeline: Option<Timeline> = self.project_timeline(&project_id);
        let (start, end) = parse_assignment_dates(start_date, end_date, timeline.as_ref())?;

        let outcome: CommitOutcome = self.commit(
            Command::AssignUser {
                project_id,
                user_id,
                start_date: start,
                end_date: end,
            },
            now,
        )?;
        self.pending = None;
        Ok(outcome)
    }

    /// Discards the pending drop with no ledger effect.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is pending.
    pub fn cancel_pending(&mut self) -> Result<PendingAssignment, CoreError> {
        let pending: PendingAssignment = self.pending.take().ok_or(CoreError::NoPendingAssignment)?;
        debug!(
            user_id = %pending.user.id,
            project_id = %pending.project.id,
            "Cancelled pending drop"
        );
        Ok(pending)
    }

    /// Assigns a user directly, or re-dates an existing assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the project is not in the directory
    /// - the user is neither in the directory nor already assigned here
    /// - the dates are unordered or fall outside the project timeline
    pub fn assign(
        &mut self,
        project_id: ProjectId,
        user_id: UserId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, CoreError> {
        if self.project(&project_id).is_none() {
            return Err(CoreError::UnknownProject(project_id));
        }
        if self.user(&user_id).is_none() && self.ledger.get(&project_id, &user_id).is_none() {
            return Err(CoreError::UnknownUser(user_id));
        }
        let timeline: Option<Timeline> = self.project_timeline(&project_id);
        validate_assignment_dates(start_date, end_date, timeline.as_ref())?;

        self.commit(
            Command::AssignUser {
                project_id,
                user_id,
                start_date,
                end_date,
            },
            now,
        )
    }

    /// Removes a user's assignment from a project. Absent pairs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition fails.
    pub fn remove_assignment(
        &mut self,
        project_id: ProjectId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, CoreError> {
        self.commit(
            Command::RemoveAssignment {
                project_id,
                user_id,
            },
            now,
        )
    }

    /// Sweeps expired assignments out of the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition fails.
    pub fn reap_expired(
        &mut self,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CommitOutcome, CoreError> {
        self.commit(Command::ReapExpired { today }, now)
    }

    fn commit(&mut self, command: Command, now: DateTime<Utc>) -> Result<CommitOutcome, CoreError> {
        let result: TransitionResult = apply(&self.ledger, command, now)?;
        let mutated: bool = result.change.is_mutation();
        self.ledger = result.new_ledger;

        let persist_warning: Option<String> = if mutated { self.persist() } else { None };
        Ok(CommitOutcome {
            change: result.change,
            persist_warning,
        })
    }

    fn persist(&mut self) -> Option<String> {
        let snapshot: Snapshot = self.snapshot();
        match self.store.save_snapshot(&snapshot) {
            Ok(()) => {
                debug!(assignments = snapshot.assignments.len(), "Saved snapshot");
                None
            }
            Err(error) => {
                warn!(%error, "Snapshot write failed; in-memory ledger remains authoritative");
                Some(format!("Changes are not saved: {error}"))
            }
        }
    }

    /// Returns the date range a project's grid covers.
    ///
    /// This is the project timeline when known, otherwise the span of the
    /// project's assignments, otherwise `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not in the directory.
    pub fn timeline_range(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, CoreError> {
        if self.project(project_id).is_none() {
            return Err(CoreError::UnknownProject(project_id.clone()));
        }
        if let Some(timeline) = self.project_timeline(project_id) {
            return Ok(Some((timeline.start_date, timeline.end_date)));
        }

        let assignments: &[Assignment] = self.ledger.assignments_for_project(project_id);
        let start: Option<NaiveDate> = assignments.iter().map(|a| a.start_date).min();
        let end: Option<NaiveDate> = assignments.iter().map(|a| a.end_date).max();
        Ok(start.zip(end))
    }

    /// Renders a project's grid at a resolution.
    ///
    /// The range is not bounded here; callers check it with
    /// [`Session::timeline_range`] first.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not in the directory.
    pub fn timeline_view(
        &self,
        project_id: &ProjectId,
        resolution: Resolution,
        today: NaiveDate,
    ) -> Result<TimelineView, CoreError> {
        let project: &Project = self
            .project(project_id)
            .ok_or_else(|| CoreError::UnknownProject(project_id.clone()))?;
        let timeline: Option<Timeline> = self.project_timeline(project_id);
        let columns: Vec<Column> = self
            .timeline_range(project_id)?
            .map_or_else(Vec::new, |(start, end)| {
                generate_columns(start, end, resolution)
            });

        let project_row: Vec<bool> = timeline.map_or_else(
            || vec![false; columns.len()],
            |t| activity_row(&columns, t.start_date, t.end_date),
        );
        let rows: Vec<TimelineRow> = self
            .ledger
            .assignments_for_project(project_id)
            .iter()
            .map(|assignment| TimelineRow {
                user_id: assignment.user_id.clone(),
                user_name: self.user(&assignment.user_id).map(|u| u.name.clone()),
                start_date: assignment.start_date,
                end_date: assignment.end_date,
                status: AssignmentStatus::evaluate(assignment.end_date, today),
                active: activity_row(&columns, assignment.start_date, assignment.end_date),
            })
            .collect();

        Ok(TimelineView {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            timeline,
            resolution,
            columns,
            project_row,
            rows,
        })
    }

    /// Builds the user details panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is neither in the directory nor in the
    /// ledger.
    pub fn user_assignments(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<UserAssignments, CoreError> {
        let user: Option<&User> = self.user(user_id);
        let held: Vec<&Assignment> = self.ledger.assignments_for_user(user_id);
        if user.is_none() && held.is_empty() {
            return Err(CoreError::UnknownUser(user_id.clone()));
        }

        let assignments: Vec<UserAssignmentEntry> = held
            .into_iter()
            .map(|assignment| UserAssignmentEntry {
                assignment: assignment.clone(),
                project_name: self.project(&assignment.project_id).map(|p| p.name.clone()),
                status: AssignmentStatus::evaluate(assignment.end_date, today),
                days_remaining: (assignment.end_date - today).num_days(),
            })
            .collect();

        Ok(UserAssignments {
            user_id: user_id.clone(),
            user: user.cloned(),
            assignments,
        })
    }

    /// Returns the persisted part of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.ledger.clone(), self.timelines.clone())
    }
}
