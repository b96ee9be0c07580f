// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{AssignmentDatesRequest, CommitResponse, DropRequest, apply_refresh, assign_user};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use planboard::{DirectoryFetch, Session};
use planboard_domain::{Epic, Project, ProjectId, User, UserId};
use planboard_persistence::Persistence;
use std::collections::BTreeMap;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn create_test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 0).unwrap()
}

pub fn create_test_today() -> NaiveDate {
    date("2024-07-10")
}

pub fn project_id(value: &str) -> ProjectId {
    ProjectId::new(value).unwrap()
}

pub fn user_id(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn dates(start: &str, end: &str) -> AssignmentDatesRequest {
    AssignmentDatesRequest {
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

pub fn drop_request(source: &str, destination: Option<&str>, draggable: &str) -> DropRequest {
    DropRequest {
        source: source.to_string(),
        destination: destination.map(ToString::to_string),
        draggable_id: draggable.to_string(),
    }
}

/// Users Alice (u1), Bob (u2) and Carol (u3); projects Website (p1, epics
/// spanning 2024-07-01..2024-09-30), Mobile App (p2, no epics) and
/// Operations (p3, declared 2024 calendar year, epics not loaded).
pub fn create_test_fetch() -> DirectoryFetch {
    let mut epics: BTreeMap<ProjectId, Vec<Epic>> = BTreeMap::new();
    epics.insert(
        project_id("p1"),
        vec![
            Epic::new("e1", Some("2024-07-01"), Some("2024-09-30")),
            Epic::new("e2", None, Some("2024-08-15")),
        ],
    );
    epics.insert(project_id("p2"), Vec::new());

    DirectoryFetch {
        users: Some(vec![
            User::new(user_id("u1"), "Alice", "alice@example.com", "Developer"),
            User::new(user_id("u2"), "Bob", "bob@example.com", "Designer"),
            User::new(user_id("u3"), "Carol", "carol@example.com", "Manager"),
        ]),
        projects: Some(vec![
            Project::new(project_id("p1"), "WEB", "Website", "Sam"),
            Project::new(project_id("p2"), "APP", "Mobile App", "Kim"),
            Project::new(project_id("p3"), "OPS", "Operations", "Lee")
                .with_declared_dates(date("2024-01-01"), date("2024-12-31")),
        ]),
        epics,
        notices: Vec::new(),
    }
}

pub fn create_test_session() -> Session<Persistence> {
    let mut session: Session<Persistence> =
        Session::open(Persistence::new_in_memory().unwrap()).unwrap();
    apply_refresh(&mut session, create_test_fetch());
    session
}

pub fn assign(
    session: &mut Session<Persistence>,
    project: &str,
    user: &str,
    start: &str,
    end: &str,
) -> CommitResponse {
    assign_user(session, project, user, &dates(start, end), create_test_now()).unwrap()
}
