// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::NewSnapshotRow;
use crate::diesel_schema::ledger_snapshots;
use crate::error::PersistenceError;

/// Writes a snapshot row, replacing any row with the same key.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn replace_snapshot(
    conn: &mut SqliteConnection,
    row: &NewSnapshotRow<'_>,
) -> Result<(), PersistenceError> {
    diesel::replace_into(ledger_snapshots::table)
        .values(row)
        .execute(conn)?;
    Ok(())
}

/// Deletes the snapshot row for a key.
///
/// Returns whether a row existed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_snapshot(
    conn: &mut SqliteConnection,
    snapshot_key: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(
        ledger_snapshots::table.filter(ledger_snapshots::snapshot_key.eq(snapshot_key)),
    )
    .execute(conn)?;
    Ok(deleted > 0)
}
