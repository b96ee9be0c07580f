// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers over a planning session.
//!
//! Handlers are synchronous and take the session by reference; the caller
//! owns locking. "Today" and "now" are passed in so every handler is
//! deterministic under test.

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignmentDatesRequest, CancelPendingResponse, ClearResponse, CommitResponse, DropRequest,
    DropResponse, ImportResponse, PendingAssignmentInfo, RefreshResponse, ReapResponse,
    SearchQuery, StatsResponse, TimelineQuery,
};
use chrono::{DateTime, NaiveDate, Utc};
use planboard::{
    CommitOutcome, DirectoryFetch, DragEvent, LedgerChange, PendingAssignment, ProjectPanels,
    RefreshOutcome, Session, Snapshot, SnapshotStore, TimelineView, UserAssignments, UserPanels,
};
use planboard_domain::{
    Assignment, ProjectId, Resolution, UserId, column_count, parse_assignment_dates,
};
use planboard_persistence::{Persistence, StoreStats};
use tracing::info;

/// Largest grid a timeline request may produce.
pub const MAX_GRID_COLUMNS: u64 = 3660;

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(translate_domain_error)
}

fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    ProjectId::new(raw).map_err(translate_domain_error)
}

fn describe_change(change: &LedgerChange) -> String {
    match change {
        LedgerChange::Assigned {
            assignment,
            replaced: Some(_),
        } => format!(
            "Updated assignment of '{}' to '{}' ({} to {})",
            assignment.user_id, assignment.project_id, assignment.start_date, assignment.end_date
        ),
        LedgerChange::Assigned { assignment, .. } => format!(
            "Assigned '{}' to '{}' ({} to {})",
            assignment.user_id, assignment.project_id, assignment.start_date, assignment.end_date
        ),
        LedgerChange::Removed {
            removed: Some(assignment),
        } => format!(
            "Removed '{}' from '{}'",
            assignment.user_id, assignment.project_id
        ),
        LedgerChange::Removed { removed: None } => String::from("Nothing to remove"),
        LedgerChange::Reaped { removed } => {
            format!("Removed {} expired assignment(s)", removed.len())
        }
    }
}

fn commit_response(outcome: CommitOutcome) -> CommitResponse {
    let message: String = describe_change(&outcome.change);
    CommitResponse {
        change: outcome.change,
        persist_warning: outcome.persist_warning,
        message,
    }
}

fn pending_info<S: SnapshotStore>(
    session: &Session<S>,
    pending: &PendingAssignment,
) -> PendingAssignmentInfo {
    PendingAssignmentInfo {
        user_id: pending.user.id.clone(),
        user_name: pending.user.name.clone(),
        project_id: pending.project.id.clone(),
        project_name: pending.project.name.clone(),
        source: pending.source.as_str().to_string(),
        timeline: session.project_timeline(&pending.project.id),
        current: session
            .ledger()
            .get(&pending.project.id, &pending.user.id)
            .cloned(),
    }
}

/// Lists users split into available, assigned and ending-soon panels.
#[must_use]
pub fn list_users<S: SnapshotStore>(
    session: &Session<S>,
    query: &SearchQuery,
    today: NaiveDate,
) -> UserPanels {
    session.user_panels(query.search.as_deref().unwrap_or_default(), today)
}

/// Returns the assignments held by one user.
///
/// # Errors
///
/// Returns an error if the id is empty or the user is unknown.
pub fn get_user_assignments<S: SnapshotStore>(
    session: &Session<S>,
    user_id: &str,
    today: NaiveDate,
) -> Result<UserAssignments, ApiError> {
    let user_id: UserId = parse_user_id(user_id)?;
    session
        .user_assignments(&user_id, today)
        .map_err(translate_core_error)
}

/// Lists project cards split into active and upcoming panels.
#[must_use]
pub fn list_projects<S: SnapshotStore>(session: &Session<S>, query: &SearchQuery) -> ProjectPanels {
    session.project_panels(query.search.as_deref().unwrap_or_default())
}

/// Renders a project's timeline grid.
///
/// # Errors
///
/// Returns an error if:
/// - The project id is empty or unknown
/// - The resolution is not recognized
/// - The grid would exceed [`MAX_GRID_COLUMNS`] columns
pub fn get_project_timeline<S: SnapshotStore>(
    session: &Session<S>,
    project_id: &str,
    query: &TimelineQuery,
    today: NaiveDate,
) -> Result<TimelineView, ApiError> {
    let project_id: ProjectId = parse_project_id(project_id)?;
    let resolution: Resolution = match query.resolution.as_deref() {
        Some(raw) => raw.parse::<Resolution>().map_err(translate_domain_error)?,
        None => Resolution::default(),
    };

    if let Some((start, end)) = session
        .timeline_range(&project_id)
        .map_err(translate_core_error)?
    {
        let columns: u64 = column_count(start, end, resolution);
        if columns > MAX_GRID_COLUMNS {
            return Err(ApiError::InvalidInput {
                field: String::from("resolution"),
                message: format!(
                    "{start} to {end} needs {columns} {resolution} columns; the limit is {MAX_GRID_COLUMNS}"
                ),
            });
        }
    }

    session
        .timeline_view(&project_id, resolution, today)
        .map_err(translate_core_error)
}

/// Handles a drag gesture.
///
/// An invalid gesture is not an error: it is reported as not accepted and
/// leaves the session unchanged.
#[must_use]
pub fn drop_user<S: SnapshotStore>(session: &mut Session<S>, request: DropRequest) -> DropResponse {
    let event: DragEvent = DragEvent {
        source: request.source,
        destination: request.destination,
        draggable_id: request.draggable_id,
    };
    let pending: Option<PendingAssignment> = session.on_drop(&event).cloned();
    DropResponse {
        accepted: pending.is_some(),
        pending: pending.map(|p| pending_info(session, &p)),
    }
}

/// Returns the drop awaiting dates, if any.
#[must_use]
pub fn get_pending<S: SnapshotStore>(session: &Session<S>) -> Option<PendingAssignmentInfo> {
    session.pending().map(|p| pending_info(session, p))
}

/// Confirms the pending drop with entered dates.
///
/// # Errors
///
/// Returns an error if nothing is pending or the dates are invalid; the
/// pending drop then stays open.
pub fn confirm_pending<S: SnapshotStore>(
    session: &mut Session<S>,
    request: &AssignmentDatesRequest,
    now: DateTime<Utc>,
) -> Result<CommitResponse, ApiError> {
    let outcome: CommitOutcome = session
        .confirm_pending(&request.start_date, &request.end_date, now)
        .map_err(translate_core_error)?;
    Ok(commit_response(outcome))
}

/// Discards the pending drop.
///
/// # Errors
///
/// Returns an error if nothing is pending.
pub fn cancel_pending<S: SnapshotStore>(
    session: &mut Session<S>,
) -> Result<CancelPendingResponse, ApiError> {
    let pending: PendingAssignment = session.cancel_pending().map_err(translate_core_error)?;
    Ok(CancelPendingResponse {
        user_id: pending.user.id,
        project_id: pending.project.id,
    })
}

/// Assigns a user directly, or re-dates an existing assignment.
///
/// # Errors
///
/// Returns an error if an id is empty or unknown, or the dates are missing,
/// unparseable, unordered or outside the project timeline.
pub fn assign_user<S: SnapshotStore>(
    session: &mut Session<S>,
    project_id: &str,
    user_id: &str,
    request: &AssignmentDatesRequest,
    now: DateTime<Utc>,
) -> Result<CommitResponse, ApiError> {
    let project_id: ProjectId = parse_project_id(project_id)?;
    let user_id: UserId = parse_user_id(user_id)?;
    let (start, end) = parse_assignment_dates(&request.start_date, &request.end_date, None)
        .map_err(translate_domain_error)?;

    let outcome: CommitOutcome = session
        .assign(project_id, user_id, start, end, now)
        .map_err(translate_core_error)?;
    Ok(commit_response(outcome))
}

/// Removes a user from a project. Removing an absent pair succeeds.
///
/// # Errors
///
/// Returns an error if an id is empty.
pub fn remove_assignment<S: SnapshotStore>(
    session: &mut Session<S>,
    project_id: &str,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<CommitResponse, ApiError> {
    let project_id: ProjectId = parse_project_id(project_id)?;
    let user_id: UserId = parse_user_id(user_id)?;
    let outcome: CommitOutcome = session
        .remove_assignment(project_id, user_id, now)
        .map_err(translate_core_error)?;
    Ok(commit_response(outcome))
}

/// Sweeps expired assignments out of the ledger.
///
/// # Errors
///
/// Returns an error if the transition fails.
pub fn reap_expired<S: SnapshotStore>(
    session: &mut Session<S>,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<ReapResponse, ApiError> {
    let outcome: CommitOutcome = session
        .reap_expired(today, now)
        .map_err(translate_core_error)?;
    let removed: Vec<Assignment> = match outcome.change {
        LedgerChange::Reaped { removed } => removed,
        LedgerChange::Assigned { .. } | LedgerChange::Removed { .. } => {
            return Err(ApiError::Internal {
                message: String::from("expiry sweep reported a non-sweep change"),
            });
        }
    };
    Ok(ReapResponse {
        removed,
        persist_warning: outcome.persist_warning,
    })
}

/// Applies the results of a directory fetch.
#[must_use]
pub fn apply_refresh<S: SnapshotStore>(
    session: &mut Session<S>,
    fetch: DirectoryFetch,
) -> RefreshResponse {
    let outcome: RefreshOutcome = session.apply_fetch(fetch);
    RefreshResponse {
        user_count: session.users().len(),
        project_count: session.projects().len(),
        timelines_recomputed: outcome.timelines_recomputed,
        notices: outcome.notices,
        persist_warning: outcome.persist_warning,
    }
}

/// Exports the stored snapshot as JSON.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn export_snapshot(session: &mut Session<Persistence>) -> Result<String, ApiError> {
    session
        .store_mut()
        .export_json()
        .map_err(translate_persistence_error)
}

/// Replaces the stored snapshot and reloads the session from it.
///
/// # Errors
///
/// Returns an error if the document is rejected or the store fails. A
/// rejected document changes nothing.
pub fn import_snapshot(
    session: &mut Session<Persistence>,
    json: &str,
) -> Result<ImportResponse, ApiError> {
    let snapshot: Snapshot = session
        .store_mut()
        .import_json(json)
        .map_err(translate_persistence_error)?;
    session.reload().map_err(translate_persistence_error)?;
    info!(assignments = snapshot.assignments.len(), "Session reloaded from import");
    Ok(ImportResponse {
        imported: snapshot.stats(),
        message: format!("Imported {} assignment(s)", snapshot.assignments.len()),
    })
}

/// Deletes the stored snapshot and empties the session's ledger.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn clear_snapshot(session: &mut Session<Persistence>) -> Result<ClearResponse, ApiError> {
    let cleared: bool = session
        .store_mut()
        .clear()
        .map_err(translate_persistence_error)?;
    session.reload().map_err(translate_persistence_error)?;
    Ok(ClearResponse {
        cleared,
        message: if cleared {
            String::from("Stored data cleared")
        } else {
            String::from("No stored data to clear")
        },
    })
}

/// Describes the live session and what its store holds.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_stats(session: &mut Session<Persistence>) -> Result<StatsResponse, ApiError> {
    let store: StoreStats = session
        .store_mut()
        .stats()
        .map_err(translate_persistence_error)?;
    Ok(StatsResponse {
        session: session.snapshot().stats(),
        store,
        directory_users: session.users().len(),
        directory_projects: session.projects().len(),
        has_pending: session.pending().is_some(),
    })
}
