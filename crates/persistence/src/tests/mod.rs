// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use planboard::{Ledger, Snapshot};
use planboard_domain::{Assignment, ProjectId, Timeline, UserId};
use std::collections::BTreeMap;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn create_test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 0).unwrap()
}

pub fn create_test_assignment(project: &str, user: &str, start: &str, end: &str) -> Assignment {
    Assignment {
        project_id: ProjectId::new(project).unwrap(),
        user_id: UserId::new(user).unwrap(),
        start_date: date(start),
        end_date: date(end),
        assigned_at: create_test_now(),
    }
}

/// Two projects, three assignments, one stored timeline.
pub fn create_test_snapshot() -> Snapshot {
    let ledger: Ledger = Ledger::from_assignments(vec![
        create_test_assignment("p1", "u1", "2024-07-01", "2024-07-31"),
        create_test_assignment("p1", "u2", "2024-07-15", "2024-08-15"),
        create_test_assignment("p2", "u1", "2024-08-01", "2024-09-30"),
    ]);
    let mut timelines: BTreeMap<ProjectId, Timeline> = BTreeMap::new();
    timelines.insert(
        ProjectId::new("p1").unwrap(),
        Timeline::new(date("2024-07-01"), date("2024-09-30")).unwrap(),
    );
    Snapshot::new(ledger, timelines)
}
