// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Planboard.
//!
//! This crate converts transport-level requests into session operations and
//! session results into response DTOs. It owns no state: every handler
//! receives the session it works on.
//!
//! ## Invariants
//!
//! - Domain, core and persistence errors never cross this boundary
//!   untranslated; callers only see [`ApiError`]
//! - A rejected request leaves the session unchanged

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    MAX_GRID_COLUMNS, apply_refresh, assign_user, cancel_pending, clear_snapshot,
    confirm_pending, drop_user, export_snapshot, get_pending, get_project_timeline, get_stats,
    get_user_assignments, import_snapshot, list_projects, list_users, reap_expired,
    remove_assignment,
};
pub use request_response::{
    AssignmentDatesRequest, CancelPendingResponse, ClearResponse, CommitResponse, DropRequest,
    DropResponse, ImportResponse, PendingAssignmentInfo, RefreshResponse, ReapResponse,
    SearchQuery, StatsResponse, TimelineQuery,
};
