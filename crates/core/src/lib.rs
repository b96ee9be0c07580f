// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod directory;
mod dnd;
mod error;
mod ledger;
mod session;
mod snapshot;
mod state;
mod store;
mod views;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use directory::{
    Directory, DirectoryError, DirectoryFetch, FetchNotice, FetchSource, fetch_directory,
};
pub use dnd::{
    DragEvent, DropSource, PROJECT_TARGET_PREFIX, PendingAssignment, USER_DRAGGABLE_PREFIX,
    parse_draggable_user, parse_project_target, resolve_drop,
};
pub use error::CoreError;
pub use ledger::{EndingSoonUser, Ledger};
pub use session::{CommitOutcome, RefreshOutcome, Session};
pub use snapshot::{Snapshot, SnapshotStats};
pub use state::{LedgerChange, TransitionResult};
pub use store::SnapshotStore;
pub use views::{
    ProjectCard, ProjectPanels, TimelineRow, TimelineView, UserAssignmentEntry, UserAssignments,
    UserPanels,
};
