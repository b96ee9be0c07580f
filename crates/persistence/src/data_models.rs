// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::ledger_snapshots;
use diesel::prelude::*;
use planboard::SnapshotStats;
use serde::Serialize;

/// Diesel Queryable struct for snapshot rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = ledger_snapshots)]
pub struct SnapshotRow {
    pub payload_json: String,
    pub saved_at: String,
}

/// Diesel Insertable struct for snapshot rows.
#[derive(Debug, Insertable)]
#[diesel(table_name = ledger_snapshots)]
pub struct NewSnapshotRow<'a> {
    pub snapshot_key: &'a str,
    pub payload_json: &'a str,
    pub saved_at: &'a str,
}

/// Storage statistics for the current snapshot key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// The key snapshots are stored under.
    pub snapshot_key: String,
    /// Counts from the stored snapshot; all zero when nothing is stored.
    pub snapshot: SnapshotStats,
    /// Size of the stored JSON payload in bytes.
    pub data_size: usize,
    /// RFC 3339 timestamp of the last save, if any.
    pub last_updated: Option<String>,
}
