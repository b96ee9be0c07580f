// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod directory_tests;

use crate::AppState;
use crate::directory::{DirectoryFixture, StaticDirectory};
use crate::live::LiveEventBroadcaster;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{DateTime, TimeZone, Utc};
use planboard::Session;
use planboard_domain::{Epic, Project, ProjectId, Tz, User, UserId};
use planboard_persistence::Persistence;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn create_test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 10, 9, 0, 0).unwrap()
}

/// Alice, Bob and Carol; Website (WEB, epics 2024-07-01..2024-09-30),
/// Mobile App (APP, no epics) and Operations (OPS, declared 2024).
pub fn create_test_fixture() -> DirectoryFixture {
    let mut epics: BTreeMap<String, Vec<Epic>> = BTreeMap::new();
    epics.insert(
        String::from("WEB"),
        vec![
            Epic::new("e1", Some("2024-07-01"), Some("2024-09-30")),
            Epic::new("e2", None, Some("2024-08-15")),
        ],
    );
    DirectoryFixture {
        users: vec![
            User::new(UserId::new("u1").unwrap(), "Alice", "alice@example.com", "Developer"),
            User::new(UserId::new("u2").unwrap(), "Bob", "bob@example.com", "Designer"),
            User::new(UserId::new("u3").unwrap(), "Carol", "carol@example.com", "Manager"),
        ],
        projects: vec![
            Project::new(ProjectId::new("p1").unwrap(), "WEB", "Website", "Sam"),
            Project::new(ProjectId::new("p2").unwrap(), "APP", "Mobile App", "Kim"),
            Project::new(ProjectId::new("p3").unwrap(), "OPS", "Operations", "Lee")
                .with_declared_dates(
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                ),
        ],
        epics,
    }
}

/// App state over an in-memory store, a static directory and a clock
/// frozen at 2024-07-10T09:00Z. The directory has not been loaded yet.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        session: Arc::new(Mutex::new(Session::open(persistence).unwrap())),
        directory: Arc::new(StaticDirectory::new(create_test_fixture())),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        timezone: Tz::UTC,
        clock: create_test_now,
    }
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
