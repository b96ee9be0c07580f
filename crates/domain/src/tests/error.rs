// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::date;
use crate::DomainError;

#[test]
fn test_date_range_message_names_both_dates() {
    let error: DomainError = DomainError::InvalidDateRange {
        start: date("2024-03-05"),
        end: date("2024-03-01"),
    };

    assert_eq!(
        error.to_string(),
        "Start date must be before end date (2024-03-05 is not before 2024-03-01)"
    );
}

#[test]
fn test_project_bound_messages_name_the_bound() {
    let before: DomainError = DomainError::StartBeforeProject {
        start: date("2023-12-01"),
        project_start: date("2024-01-10"),
    };
    let after: DomainError = DomainError::EndAfterProject {
        end: date("2024-04-01"),
        project_end: date("2024-03-01"),
    };

    assert_eq!(
        before.to_string(),
        "Start date cannot be before project start (2024-01-10)"
    );
    assert_eq!(
        after.to_string(),
        "End date cannot be after project end (2024-03-01)"
    );
}

#[test]
fn test_missing_and_identifier_messages() {
    assert_eq!(
        DomainError::MissingDate { field: "end_date" }.to_string(),
        "Both start and end dates are required (missing end_date)"
    );
    assert_eq!(
        DomainError::EmptyIdentifier { kind: "user" }.to_string(),
        "Invalid user identifier: must not be empty"
    );
    assert_eq!(
        DomainError::InvalidResolution(String::from("hour")).to_string(),
        "Invalid resolution 'hour': expected day, week, month or year"
    );
}
