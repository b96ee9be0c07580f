// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use planboard::CoreError;
use planboard_domain::DomainError;
use planboard_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::MissingDate { field } => ApiError::InvalidInput {
            field: String::from(field),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
        DomainError::InvalidDateRange { .. } => ApiError::DomainRuleViolation {
            rule: String::from("start_before_end"),
            message,
        },
        DomainError::InvertedTimeline { .. } => ApiError::DomainRuleViolation {
            rule: String::from("ordered_timeline"),
            message,
        },
        DomainError::StartBeforeProject { .. } => ApiError::DomainRuleViolation {
            rule: String::from("within_project_start"),
            message,
        },
        DomainError::EndAfterProject { .. } => ApiError::DomainRuleViolation {
            rule: String::from("within_project_end"),
            message,
        },
        DomainError::InvalidResolution(_) => ApiError::InvalidInput {
            field: String::from("resolution"),
            message,
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message,
        },
        DomainError::EmptyIdentifier { kind } => ApiError::InvalidInput {
            field: format!("{kind}_id"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnknownUser(user_id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User '{user_id}' does not exist"),
        },
        CoreError::UnknownProject(project_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("Project '{project_id}' does not exist"),
        },
        CoreError::NoPendingAssignment => ApiError::DomainRuleViolation {
            rule: String::from("pending_assignment_required"),
            message: CoreError::NoPendingAssignment.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Rejected imports are the caller's fault; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SerializationError(msg) | PersistenceError::InvalidSnapshot(msg) => {
            ApiError::InvalidInput {
                field: String::from("snapshot"),
                message: msg,
            }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
