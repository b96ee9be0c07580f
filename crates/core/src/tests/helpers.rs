// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, Directory, DirectoryError, Ledger, Session, Snapshot, SnapshotStore, apply,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use planboard_domain::{Epic, Project, ProjectId, User, UserId};
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

pub fn user_id(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn project_id(value: &str) -> ProjectId {
    ProjectId::new(value).unwrap()
}

pub fn create_test_users() -> Vec<User> {
    vec![
        User::new(user_id("u1"), "Alice", "alice@example.com", "Developer"),
        User::new(user_id("u2"), "Bob", "bob@example.com", "Designer"),
        User::new(user_id("u3"), "Carol", "carol@example.com", "Manager"),
    ]
}

pub fn create_test_projects() -> Vec<Project> {
    vec![
        Project::new(project_id("p1"), "WEB", "Website", "Sam"),
        Project::new(project_id("p2"), "APP", "Mobile App", "Kim"),
        Project::new(project_id("p3"), "OPS", "Operations", "Lee")
            .with_declared_dates(date("2024-01-01"), date("2024-12-31")),
    ]
}

pub fn assign_command(project: &str, user: &str, start: &str, end: &str) -> Command {
    Command::AssignUser {
        project_id: project_id(project),
        user_id: user_id(user),
        start_date: date(start),
        end_date: date(end),
    }
}

/// Applies a sequence of assignment commands to an empty ledger.
pub fn create_test_ledger(entries: &[(&str, &str, &str, &str)]) -> Ledger {
    entries
        .iter()
        .fold(Ledger::new(), |ledger, (project, user, start, end)| {
            apply(&ledger, assign_command(project, user, start, end), create_test_now())
                .unwrap()
                .new_ledger
        })
}

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
pub struct MemoryStoreError;

/// A snapshot store kept in memory, optionally failing every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<Snapshot>,
    pub save_count: usize,
    pub fail_writes: bool,
}

impl SnapshotStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_snapshot(&mut self) -> Result<Option<Snapshot>, Self::Error> {
        Ok(self.saved.clone())
    }

    fn save_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError);
        }
        self.saved = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}

/// A directory backed by fixed data; any list left `None` fails to fetch.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    pub users: Option<Vec<User>>,
    pub projects: Option<Vec<Project>>,
    pub epics: BTreeMap<String, Vec<Epic>>,
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError> {
        self.users
            .clone()
            .ok_or_else(|| DirectoryError::Unavailable(String::from("users offline")))
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, DirectoryError> {
        self.projects
            .clone()
            .ok_or_else(|| DirectoryError::Unavailable(String::from("projects offline")))
    }

    async fn fetch_epics(&self, project_key: &str) -> Result<Vec<Epic>, DirectoryError> {
        self.epics
            .get(project_key)
            .cloned()
            .ok_or_else(|| DirectoryError::Status {
                status: 404,
                message: format!("no epics for {project_key}"),
            })
    }
}

pub fn create_test_epics() -> BTreeMap<String, Vec<Epic>> {
    let mut epics: BTreeMap<String, Vec<Epic>> = BTreeMap::new();
    epics.insert(
        String::from("WEB"),
        vec![
            Epic::new("e1", Some("2024-07-01"), Some("2024-09-30")),
            Epic::new("e2", None, Some("2024-08-15")),
        ],
    );
    epics.insert(String::from("APP"), Vec::new());
    epics
}

/// A session with users and projects loaded and the WEB project's epics
/// giving it a 2024-07-01..2024-09-30 timeline.
pub fn create_test_session() -> Session<MemoryStore> {
    let mut session: Session<MemoryStore> = Session::open(MemoryStore::default()).unwrap();
    let fetch = crate::DirectoryFetch {
        users: Some(create_test_users()),
        projects: Some(create_test_projects()),
        epics: create_test_epics()
            .into_iter()
            .filter_map(|(key, epics)| {
                create_test_projects()
                    .into_iter()
                    .find(|p| p.key == key)
                    .map(|p| (p.id, epics))
            })
            .collect(),
        notices: Vec::new(),
    };
    session.apply_fetch(fetch);
    session
}
