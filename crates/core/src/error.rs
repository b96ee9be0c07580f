// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use planboard_domain::{DomainError, ProjectId, UserId};

/// Errors that can occur during ledger transitions and session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The user is not known to the directory or the ledger.
    #[error("User '{0}' not found")]
    UnknownUser(UserId),
    /// The project is not known to the directory.
    #[error("Project '{0}' not found")]
    UnknownProject(ProjectId),
    /// A confirmation or cancellation arrived with nothing pending.
    #[error("No assignment is awaiting confirmation")]
    NoPendingAssignment,
}
