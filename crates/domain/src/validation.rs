// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::parse_calendar_date;
use crate::error::DomainError;
use crate::types::Timeline;
use chrono::NaiveDate;

/// Validates that an assignment interval is strictly ordered.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start` is not before `end`.
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    // Rule: start must be strictly before end
    if start >= end {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates the dates entered for a new or re-dated assignment.
///
/// # Arguments
///
/// * `start` - The requested first day
/// * `end` - The requested last day
/// * `project_timeline` - The project's timeline, when one is known
///
/// # Errors
///
/// Returns an error if:
/// - `start` is not strictly before `end`
/// - a project timeline is supplied and `start` precedes it
/// - a project timeline is supplied and `end` follows it
pub fn validate_assignment_dates(
    start: NaiveDate,
    end: NaiveDate,
    project_timeline: Option<&Timeline>,
) -> Result<(), DomainError> {
    validate_date_order(start, end)?;

    if let Some(timeline) = project_timeline {
        // Rule: the assignment must fit inside the project timeline
        if start < timeline.start_date {
            return Err(DomainError::StartBeforeProject {
                start,
                project_start: timeline.start_date,
            });
        }
        if end > timeline.end_date {
            return Err(DomainError::EndAfterProject {
                end,
                project_end: timeline.end_date,
            });
        }
    }

    Ok(())
}

/// Parses and validates raw date-entry input.
///
/// Empty strings are reported as missing rather than unparseable.
///
/// # Errors
///
/// Returns an error if either value is missing or unparseable, or if the
/// parsed dates fail [`validate_assignment_dates`].
pub fn parse_assignment_dates(
    start: &str,
    end: &str,
    project_timeline: Option<&Timeline>,
) -> Result<(NaiveDate, NaiveDate), DomainError> {
    if start.trim().is_empty() {
        return Err(DomainError::MissingDate { field: "start_date" });
    }
    if end.trim().is_empty() {
        return Err(DomainError::MissingDate { field: "end_date" });
    }
    let start: NaiveDate = parse_calendar_date(start)?;
    let end: NaiveDate = parse_calendar_date(end)?;
    validate_assignment_dates(start, end, project_timeline)?;
    Ok((start, end))
}
