// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::SnapshotRow;
use crate::diesel_schema::ledger_snapshots;
use crate::error::PersistenceError;

/// Retrieves the stored snapshot row for a key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `snapshot_key` - The key the snapshot is stored under
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_snapshot_row(
    conn: &mut SqliteConnection,
    snapshot_key: &str,
) -> Result<Option<SnapshotRow>, PersistenceError> {
    ledger_snapshots::table
        .filter(ledger_snapshots::snapshot_key.eq(snapshot_key))
        .select(SnapshotRow::as_select())
        .first::<SnapshotRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_snapshot_row: {e}")))
}
