// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required date was not supplied.
    #[error("Both start and end dates are required (missing {field})")]
    MissingDate {
        /// The name of the missing field.
        field: &'static str,
    },
    /// Failed to parse a date from a string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The start date is not strictly before the end date.
    #[error("Start date must be before end date ({start} is not before {end})")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },
    /// A timeline was constructed with its end before its start.
    #[error("Timeline end {end} precedes its start {start}")]
    InvertedTimeline {
        /// The timeline start.
        start: NaiveDate,
        /// The timeline end.
        end: NaiveDate,
    },
    /// The requested start date falls before the project timeline.
    #[error("Start date cannot be before project start ({project_start})")]
    StartBeforeProject {
        /// The requested start date.
        start: NaiveDate,
        /// The first day of the project timeline.
        project_start: NaiveDate,
    },
    /// The requested end date falls after the project timeline.
    #[error("End date cannot be after project end ({project_end})")]
    EndAfterProject {
        /// The requested end date.
        end: NaiveDate,
        /// The last day of the project timeline.
        project_end: NaiveDate,
    },
    /// A timeline resolution string was not recognized.
    #[error("Invalid resolution '{0}': expected day, week, month or year")]
    InvalidResolution(String),
    /// A timezone name was not recognized.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    /// An identifier was empty.
    #[error("Invalid {kind} identifier: must not be empty")]
    EmptyIdentifier {
        /// The kind of identifier (user, project).
        kind: &'static str,
    },
}
