// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ledger::Ledger;
use planboard_domain::Assignment;
use serde::Serialize;

/// What a successful transition changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerChange {
    /// An assignment was created or re-dated.
    Assigned {
        /// The assignment as stored after the transition.
        assignment: Assignment,
        /// The record it replaced, if the pair was already assigned.
        replaced: Option<Assignment>,
    },
    /// An assignment removal was requested.
    Removed {
        /// The removed record; `None` when the pair was not assigned.
        removed: Option<Assignment>,
    },
    /// Expired assignments were swept.
    Reaped {
        /// Every record the sweep removed.
        removed: Vec<Assignment>,
    },
}

impl LedgerChange {
    /// Returns whether the transition altered the ledger at all.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        match self {
            Self::Assigned { .. } => true,
            Self::Removed { removed } => removed.is_some(),
            Self::Reaped { removed } => !removed.is_empty(),
        }
    }
}

/// The result of a successful ledger transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The ledger after the transition.
    pub new_ledger: Ledger,
    /// What the transition changed.
    pub change: LedgerChange,
}
