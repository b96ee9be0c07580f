// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    assign_command, create_test_ledger, create_test_now, create_test_users, date, project_id,
    user_id,
};
use crate::{Command, CoreError, Ledger, LedgerChange, TransitionResult, apply};
use chrono::{DateTime, Duration, Utc};
use planboard_domain::{Assignment, DomainError, User};

#[test]
fn test_assign_creates_record() {
    let ledger: Ledger = Ledger::new();

    let result: TransitionResult = apply(
        &ledger,
        assign_command("p1", "u1", "2024-07-01", "2024-07-31"),
        create_test_now(),
    )
    .unwrap();

    assert_eq!(result.new_ledger.len(), 1);
    let stored: &Assignment = result
        .new_ledger
        .get(&project_id("p1"), &user_id("u1"))
        .unwrap();
    assert_eq!(stored.start_date, date("2024-07-01"));
    assert_eq!(stored.assigned_at, create_test_now());
    assert!(matches!(
        result.change,
        LedgerChange::Assigned { replaced: None, .. }
    ));
}

#[test]
fn test_second_assign_for_same_pair_updates_in_place() {
    let first_at: DateTime<Utc> = create_test_now();
    let second_at: DateTime<Utc> = first_at + Duration::hours(2);
    let ledger: Ledger = apply(
        &Ledger::new(),
        assign_command("p1", "u1", "2024-07-01", "2024-07-31"),
        first_at,
    )
    .unwrap()
    .new_ledger;

    let result: TransitionResult = apply(
        &ledger,
        assign_command("p1", "u1", "2024-08-01", "2024-08-15"),
        second_at,
    )
    .unwrap();

    assert_eq!(result.new_ledger.len(), 1);
    let stored: &Assignment = result
        .new_ledger
        .get(&project_id("p1"), &user_id("u1"))
        .unwrap();
    assert_eq!(stored.start_date, date("2024-08-01"));
    assert_eq!(stored.end_date, date("2024-08-15"));
    assert_eq!(stored.assigned_at, second_at);

    let LedgerChange::Assigned { replaced, .. } = result.change else {
        panic!("expected an assignment change");
    };
    assert_eq!(replaced.unwrap().end_date, date("2024-07-31"));
}

#[test]
fn test_user_may_hold_assignments_in_two_projects() {
    let ledger: Ledger = create_test_ledger(&[
        ("p1", "u1", "2024-07-01", "2024-07-31"),
        ("p2", "u1", "2024-07-15", "2024-08-31"),
    ]);
    let users: Vec<User> = create_test_users();

    assert_eq!(ledger.len(), 2);
    let assigned: Vec<&User> = ledger.assigned_users(&users, date("2024-07-10"));
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, user_id("u1"));
}

#[test]
fn test_unordered_interval_is_rejected_without_change() {
    let ledger: Ledger = create_test_ledger(&[("p1", "u1", "2024-07-01", "2024-07-31")]);

    let result: Result<TransitionResult, CoreError> = apply(
        &ledger,
        assign_command("p1", "u1", "2024-08-01", "2024-08-01"),
        create_test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidDateRange { .. }))
    ));
    assert_eq!(
        ledger.get(&project_id("p1"), &user_id("u1")).unwrap().end_date,
        date("2024-07-31")
    );
}

#[test]
fn test_remove_absent_pair_is_noop() {
    let ledger: Ledger = create_test_ledger(&[("p1", "u1", "2024-07-01", "2024-07-31")]);

    let result: TransitionResult = apply(
        &ledger,
        Command::RemoveAssignment {
            project_id: project_id("p1"),
            user_id: user_id("u2"),
        },
        create_test_now(),
    )
    .unwrap();

    assert_eq!(result.new_ledger, ledger);
    assert_eq!(result.change, LedgerChange::Removed { removed: None });
    assert!(!result.change.is_mutation());
}

#[test]
fn test_remove_last_assignment_prunes_project() {
    let ledger: Ledger = create_test_ledger(&[
        ("p1", "u1", "2024-07-01", "2024-07-31"),
        ("p2", "u2", "2024-07-01", "2024-07-31"),
    ]);

    let result: TransitionResult = apply(
        &ledger,
        Command::RemoveAssignment {
            project_id: project_id("p1"),
            user_id: user_id("u1"),
        },
        create_test_now(),
    )
    .unwrap();

    assert!(result.change.is_mutation());
    assert_eq!(result.new_ledger.len(), 1);
    assert_eq!(
        result.new_ledger.project_ids().cloned().collect::<Vec<_>>(),
        vec![project_id("p2")]
    );
}

#[test]
fn test_reap_removes_only_expired() {
    let ledger: Ledger = create_test_ledger(&[
        ("p1", "u1", "2024-06-01", "2024-07-09"),
        ("p1", "u2", "2024-06-01", "2024-07-10"),
        ("p2", "u3", "2024-06-01", "2024-06-30"),
    ]);

    let result: TransitionResult = apply(
        &ledger,
        Command::ReapExpired {
            today: date("2024-07-10"),
        },
        create_test_now(),
    )
    .unwrap();

    let LedgerChange::Reaped { removed } = result.change else {
        panic!("expected a reap change");
    };
    assert_eq!(removed.len(), 2);
    assert_eq!(result.new_ledger.len(), 1);
    assert!(
        result
            .new_ledger
            .get(&project_id("p1"), &user_id("u2"))
            .is_some()
    );
    assert_eq!(result.new_ledger.project_ids().count(), 1);
}

#[test]
fn test_apply_never_mutates_input() {
    let ledger: Ledger = create_test_ledger(&[("p1", "u1", "2024-06-01", "2024-06-30")]);
    let before: Ledger = ledger.clone();

    let result: TransitionResult = apply(
        &ledger,
        Command::ReapExpired {
            today: date("2024-07-10"),
        },
        create_test_now(),
    )
    .unwrap();

    assert!(result.new_ledger.is_empty());
    assert_eq!(ledger, before);
}
