// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::ledger::Ledger;
use crate::state::{LedgerChange, TransitionResult};
use chrono::{DateTime, Utc};
use planboard_domain::{Assignment, validate_date_order};
use tracing::debug;

/// Applies a command to the ledger, producing a new ledger.
///
/// The input ledger is never modified. On error, no new ledger is produced.
///
/// # Arguments
///
/// * `ledger` - The current ledger (immutable)
/// * `command` - The command to apply
/// * `now` - The instant recorded as `assigned_at` on created or re-dated records
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new ledger and the change made
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if an `AssignUser` interval is not strictly ordered.
pub fn apply(
    ledger: &Ledger,
    command: Command,
    now: DateTime<Utc>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::AssignUser {
            project_id,
            user_id,
            start_date,
            end_date,
        } => {
            // The ledger re-checks ordering even though date entry already did.
            validate_date_order(start_date, end_date)?;

            let assignment: Assignment = Assignment {
                project_id,
                user_id,
                start_date,
                end_date,
                assigned_at: now,
            };

            let mut new_ledger: Ledger = ledger.clone();
            let replaced: Option<Assignment> = new_ledger.upsert(assignment.clone());

            debug!(
                project_id = %assignment.project_id,
                user_id = %assignment.user_id,
                start_date = %assignment.start_date,
                end_date = %assignment.end_date,
                updated = replaced.is_some(),
                "Applied AssignUser"
            );

            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::Assigned {
                    assignment,
                    replaced,
                },
            })
        }
        Command::RemoveAssignment {
            project_id,
            user_id,
        } => {
            let mut new_ledger: Ledger = ledger.clone();
            let removed: Option<Assignment> = new_ledger.remove(&project_id, &user_id);

            debug!(
                project_id = %project_id,
                user_id = %user_id,
                removed = removed.is_some(),
                "Applied RemoveAssignment"
            );

            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::Removed { removed },
            })
        }
        Command::ReapExpired { today } => {
            let mut new_ledger: Ledger = ledger.clone();
            let removed: Vec<Assignment> = new_ledger.reap_expired(today);

            debug!(
                today = %today,
                removed_count = removed.len(),
                "Applied ReapExpired"
            );

            Ok(TransitionResult {
                new_ledger,
                change: LedgerChange::Reaped { removed },
            })
        }
    }
}
