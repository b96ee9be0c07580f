// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;
use planboard_domain::{ProjectId, UserId};

/// A command represents a requested ledger change as data only.
///
/// Commands are the only way to request ledger changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Assign a user to a project, or re-date an existing assignment.
    AssignUser {
        /// The project to assign to.
        project_id: ProjectId,
        /// The user being assigned.
        user_id: UserId,
        /// First day of the assignment.
        start_date: NaiveDate,
        /// Last day of the assignment (inclusive).
        end_date: NaiveDate,
    },
    /// Remove a user's assignment from a project.
    RemoveAssignment {
        /// The project to remove from.
        project_id: ProjectId,
        /// The user being removed.
        user_id: UserId,
    },
    /// Remove every assignment whose end date is before `today`.
    ReapExpired {
        /// The local calendar date the sweep is evaluated against.
        today: NaiveDate,
    },
}
