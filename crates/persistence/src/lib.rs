// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot persistence for Planboard.
//!
//! Sessions persist their whole state (the assignment ledger plus the last
//! computed project timelines) as a single JSON document stored under a
//! key. This crate keeps those documents in `SQLite` via Diesel.
//!
//! ## Storage Model
//!
//! - One row per snapshot key in `ledger_snapshots`
//! - Each save replaces the row (last writer wins)
//! - The payload is the serialized [`Snapshot`] and is readable on its own,
//!   which is what export and import exchange
//!
//! ## Testing
//!
//! In-memory databases are shared-cache `SQLite` URLs with a unique name per
//! adapter, so every test gets an isolated database without touching disk.

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

use chrono::Utc;
use diesel::SqliteConnection;
use planboard::{Snapshot, SnapshotStats, SnapshotStore};
use planboard_domain::validate_date_order;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::StoreStats;
pub use error::PersistenceError;

use data_models::{NewSnapshotRow, SnapshotRow};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The key snapshots are stored under unless another is chosen.
pub const DEFAULT_SNAPSHOT_KEY: &str = "hr_resource_manager_data";

/// `SQLite`-backed snapshot store.
pub struct Persistence {
    conn: SqliteConnection,
    snapshot_key: String,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("snapshot_key", &self.snapshot_key)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
        })
    }

    /// Stores snapshots under `key` instead of [`DEFAULT_SNAPSHOT_KEY`].
    #[must_use]
    pub fn with_snapshot_key(mut self, key: &str) -> Self {
        self.snapshot_key = key.to_string();
        self
    }

    /// Returns the key snapshots are stored under.
    #[must_use]
    pub fn snapshot_key(&self) -> &str {
        &self.snapshot_key
    }

    /// Exports the stored snapshot as pretty-printed JSON.
    ///
    /// An empty store exports an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored snapshot cannot be read.
    pub fn export_json(&mut self) -> Result<String, PersistenceError> {
        let snapshot: Snapshot = self.load_snapshot()?.unwrap_or_default();
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Replaces the stored snapshot with an imported JSON document.
    ///
    /// The document is fully validated before anything is written; a rejected
    /// import leaves the store unchanged.
    ///
    /// # Arguments
    ///
    /// * `json` - A document previously produced by [`Self::export_json`]
    ///
    /// # Returns
    ///
    /// The imported snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document is not a valid snapshot
    /// - Any assignment does not start before it ends
    /// - Any timeline ends before it starts
    /// - The write fails
    pub fn import_json(&mut self, json: &str) -> Result<Snapshot, PersistenceError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        for assignment in snapshot.assignments.iter() {
            validate_date_order(assignment.start_date, assignment.end_date).map_err(|e| {
                PersistenceError::InvalidSnapshot(format!(
                    "assignment of '{}' to '{}': {e}",
                    assignment.user_id, assignment.project_id
                ))
            })?;
        }
        self.save_snapshot(&snapshot)?;
        info!(
            snapshot_key = %self.snapshot_key,
            assignments = snapshot.assignments.len(),
            "Imported snapshot"
        );
        Ok(snapshot)
    }

    /// Deletes the stored snapshot.
    ///
    /// Returns whether a snapshot was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&mut self) -> Result<bool, PersistenceError> {
        let existed: bool = mutations::delete_snapshot(&mut self.conn, &self.snapshot_key)?;
        info!(snapshot_key = %self.snapshot_key, existed, "Cleared snapshot");
        Ok(existed)
    }

    /// Reports counts, payload size and last save time for the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored snapshot cannot be read.
    pub fn stats(&mut self) -> Result<StoreStats, PersistenceError> {
        let row: Option<SnapshotRow> = queries::get_snapshot_row(&mut self.conn, &self.snapshot_key)?;
        let Some(row) = row else {
            return Ok(StoreStats {
                snapshot_key: self.snapshot_key.clone(),
                snapshot: Snapshot::default().stats(),
                data_size: 0,
                last_updated: None,
            });
        };

        let snapshot: Snapshot = serde_json::from_str(&row.payload_json)?;
        let stats: SnapshotStats = snapshot.stats();
        Ok(StoreStats {
            snapshot_key: self.snapshot_key.clone(),
            snapshot: stats,
            data_size: row.payload_json.len(),
            last_updated: Some(row.saved_at),
        })
    }
}

impl SnapshotStore for Persistence {
    type Error = PersistenceError;

    fn load_snapshot(&mut self) -> Result<Option<Snapshot>, Self::Error> {
        let row: Option<SnapshotRow> = queries::get_snapshot_row(&mut self.conn, &self.snapshot_key)?;
        row.map(|row| serde_json::from_str::<Snapshot>(&row.payload_json))
            .transpose()
            .map_err(Into::into)
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        let payload_json: String = serde_json::to_string(snapshot)?;
        let saved_at: String = Utc::now().to_rfc3339();
        let row: NewSnapshotRow<'_> = NewSnapshotRow {
            snapshot_key: &self.snapshot_key,
            payload_json: &payload_json,
            saved_at: &saved_at,
        };
        mutations::replace_snapshot(&mut self.conn, &row)?;
        debug!(
            snapshot_key = %self.snapshot_key,
            bytes = payload_json.len(),
            "Saved snapshot"
        );
        Ok(())
    }
}
