// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    assign, create_test_now, create_test_session, create_test_today, date, dates, drop_request,
    project_id, user_id,
};
use crate::{
    ApiError, CommitResponse, DropResponse, ReapResponse, assign_user, cancel_pending,
    confirm_pending, drop_user, get_pending, reap_expired, remove_assignment,
};
use planboard::{LedgerChange, Session};
use planboard_persistence::Persistence;

#[test]
fn test_valid_drop_opens_pending_assignment() {
    let mut session: Session<Persistence> = create_test_session();

    let response: DropResponse = drop_user(
        &mut session,
        drop_request("available-users", Some("project-p1"), "u2"),
    );

    assert!(response.accepted);
    let pending = response.pending.unwrap();
    assert_eq!(pending.user_name, "Bob");
    assert_eq!(pending.project_name, "Website");
    assert_eq!(pending.source, "available-users");
    assert_eq!(pending.timeline.unwrap().start_date, date("2024-07-01"));
    assert!(pending.current.is_none());
    assert!(get_pending(&session).is_some());
    assert!(session.ledger().is_empty());
}

#[test]
fn test_drop_of_assigned_user_offers_current_dates() {
    let mut session: Session<Persistence> = create_test_session();
    assign(&mut session, "p1", "u1", "2024-07-01", "2024-07-31");

    let response: DropResponse = drop_user(
        &mut session,
        drop_request("assigned-users", Some("project-p1"), "user-u1"),
    );

    let current = response.pending.unwrap().current.unwrap();
    assert_eq!(current.end_date, date("2024-07-31"));
}

#[test]
fn test_invalid_drop_is_not_accepted() {
    let mut session: Session<Persistence> = create_test_session();

    let wrong_source: DropResponse = drop_user(
        &mut session,
        drop_request("project-p2", Some("project-p1"), "u1"),
    );
    let outside: DropResponse =
        drop_user(&mut session, drop_request("available-users", None, "u1"));
    let not_a_project: DropResponse = drop_user(
        &mut session,
        drop_request("available-users", Some("assigned-users"), "u1"),
    );

    assert!(!wrong_source.accepted);
    assert!(!outside.accepted);
    assert!(!not_a_project.accepted);
    assert!(get_pending(&session).is_none());
    assert!(session.ledger().is_empty());
}

#[test]
fn test_confirm_commits_pending_assignment() {
    let mut session: Session<Persistence> = create_test_session();
    drop_user(
        &mut session,
        drop_request("available-users", Some("project-p1"), "u2"),
    );

    let response: CommitResponse = confirm_pending(
        &mut session,
        &dates("2024-07-08", "2024-08-09"),
        create_test_now(),
    )
    .unwrap();

    assert!(response.persist_warning.is_none());
    assert!(response.message.starts_with("Assigned 'u2' to 'p1'"));
    assert!(get_pending(&session).is_none());
    assert!(session.ledger().get(&project_id("p1"), &user_id("u2")).is_some());
}

#[test]
fn test_confirm_with_bad_dates_keeps_pending() {
    let mut session: Session<Persistence> = create_test_session();
    drop_user(
        &mut session,
        drop_request("available-users", Some("project-p1"), "u2"),
    );

    let unordered = confirm_pending(
        &mut session,
        &dates("2024-08-09", "2024-07-08"),
        create_test_now(),
    );
    let too_late = confirm_pending(
        &mut session,
        &dates("2024-09-01", "2024-10-15"),
        create_test_now(),
    );
    let missing = confirm_pending(&mut session, &dates("", "2024-07-08"), create_test_now());

    assert!(matches!(
        unordered,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "start_before_end"
    ));
    assert!(matches!(
        too_late,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "within_project_end"
    ));
    assert!(matches!(
        missing,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "start_date"
    ));
    assert!(get_pending(&session).is_some());
    assert!(session.ledger().is_empty());
}

#[test]
fn test_cancel_discards_pending() {
    let mut session: Session<Persistence> = create_test_session();
    drop_user(
        &mut session,
        drop_request("becoming-available-users", Some("project-p3"), "u3"),
    );

    let cancelled = cancel_pending(&mut session).unwrap();

    assert_eq!(cancelled.user_id, user_id("u3"));
    assert_eq!(cancelled.project_id, project_id("p3"));
    assert!(session.ledger().is_empty());
    assert!(matches!(
        cancel_pending(&mut session),
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "pending_assignment_required"
    ));
}

#[test]
fn test_assign_twice_updates_dates() {
    let mut session: Session<Persistence> = create_test_session();
    assign(&mut session, "p1", "u1", "2024-07-01", "2024-07-31");

    let response: CommitResponse = assign(&mut session, "p1", "u1", "2024-08-01", "2024-08-31");

    assert!(response.message.starts_with("Updated assignment"));
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(
        session
            .ledger()
            .get(&project_id("p1"), &user_id("u1"))
            .unwrap()
            .start_date,
        date("2024-08-01")
    );
}

#[test]
fn test_assign_rejects_unknown_references() {
    let mut session: Session<Persistence> = create_test_session();

    let unknown_project = assign_user(
        &mut session,
        "p404",
        "u1",
        &dates("2024-07-01", "2024-07-31"),
        create_test_now(),
    );
    let unknown_user = assign_user(
        &mut session,
        "p1",
        "u404",
        &dates("2024-07-01", "2024-07-31"),
        create_test_now(),
    );

    assert!(matches!(
        unknown_project,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Project"
    ));
    assert!(matches!(
        unknown_user,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "User"
    ));
}

#[test]
fn test_assign_rejects_unparseable_date() {
    let mut session: Session<Persistence> = create_test_session();

    let result = assign_user(
        &mut session,
        "p1",
        "u1",
        &dates("July 1st", "2024-07-31"),
        create_test_now(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(session.ledger().is_empty());
}

#[test]
fn test_remove_assignment() {
    let mut session: Session<Persistence> = create_test_session();
    assign(&mut session, "p1", "u1", "2024-07-01", "2024-07-31");

    let removed: CommitResponse =
        remove_assignment(&mut session, "p1", "u1", create_test_now()).unwrap();
    let absent: CommitResponse =
        remove_assignment(&mut session, "p1", "u1", create_test_now()).unwrap();

    assert!(matches!(
        removed.change,
        LedgerChange::Removed { removed: Some(_) }
    ));
    assert_eq!(absent.message, "Nothing to remove");
    assert!(session.ledger().is_empty());
}

#[test]
fn test_reap_removes_expired_only() {
    let mut session: Session<Persistence> = create_test_session();
    assign(&mut session, "p3", "u2", "2024-06-01", "2024-07-05");
    assign(&mut session, "p3", "u3", "2024-06-01", "2024-07-10");

    let response: ReapResponse =
        reap_expired(&mut session, create_test_today(), create_test_now()).unwrap();

    assert_eq!(response.removed.len(), 1);
    assert_eq!(response.removed[0].user_id, user_id("u2"));
    assert!(response.persist_warning.is_none());
    // Ending today still counts as held
    assert!(session.ledger().get(&project_id("p3"), &user_id("u3")).is_some());
}

#[test]
fn test_commit_response_json_shape() {
    let mut session: Session<Persistence> = create_test_session();
    let response: CommitResponse = assign(&mut session, "p1", "u1", "2024-07-01", "2024-07-31");

    let json: serde_json::Value = serde_json::to_value(&response).unwrap();

    assert_eq!(json["change"]["kind"], "assigned");
    assert_eq!(json["change"]["assignment"]["projectId"], "p1");
    assert_eq!(json["change"]["assignment"]["userId"], "u1");
    assert_eq!(json["change"]["assignment"]["startDate"], "2024-07-01");
    assert_eq!(json["change"]["assignment"]["endDate"], "2024-07-31");
    assert!(json["change"]["replaced"].is_null());
    assert!(json["persistWarning"].is_null());
    assert!(json["message"].as_str().unwrap().starts_with("Assigned"));
}
