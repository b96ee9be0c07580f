// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::snapshot::Snapshot;

/// Key-value persistence for session snapshots.
///
/// A session reads the snapshot once when it opens and writes the full
/// snapshot after every ledger mutation. Concurrent writers are
/// last-writer-wins.
pub trait SnapshotStore {
    /// The store's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the most recently saved snapshot, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds invalid data.
    fn load_snapshot(&mut self) -> Result<Option<Snapshot>, Self::Error>;

    /// Saves a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}
