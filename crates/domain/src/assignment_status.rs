// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-derived assignment status.
//!
//! Status is a pure function of an assignment's end date and the current
//! local date. There are no transition events: status is recomputed on
//! every read.
//!
//! ```text
//! Active ──(end within 3 days)──> EndingSoon ──(end passed)──> Expired ──(reap)──> removed
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days ahead of its end date at which an assignment is
/// considered ending soon.
pub const ENDING_SOON_WINDOW_DAYS: i64 = 3;

/// The derived state of an assignment on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    /// The assignment ends today or more than three days from now.
    Active,
    /// The assignment ends one to three days from now.
    EndingSoon,
    /// The assignment's end date has passed.
    Expired,
}

impl AssignmentStatus {
    /// Evaluates the status of an assignment ending on `end_date`.
    #[must_use]
    pub fn evaluate(end_date: NaiveDate, today: NaiveDate) -> Self {
        let days_remaining: i64 = (end_date - today).num_days();
        if days_remaining < 0 {
            Self::Expired
        } else if days_remaining > 0 && days_remaining <= ENDING_SOON_WINDOW_DAYS {
            Self::EndingSoon
        } else {
            Self::Active
        }
    }

    /// Returns whether the assignment still counts as held.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        !matches!(self, Self::Expired)
    }

    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::EndingSoon => "ending-soon",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
