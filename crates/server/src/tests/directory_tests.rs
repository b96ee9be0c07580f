// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_fixture;
use crate::directory::{FileDirectory, HttpDirectory, StaticDirectory};
use planboard::{Directory, DirectoryError, DirectoryFetch, FetchSource, fetch_directory};
use planboard_domain::{Epic, User};
use std::io::Write;

const FIXTURE_JSON: &str = r#"{
    "users": [
        {"id": "acc-1", "name": "Dana", "email": "dana@example.com", "role": "Developer"}
    ],
    "projects": [
        {"id": "10001", "key": "PLAT", "name": "Platform", "lead": "Dana"}
    ],
    "epics": {
        "PLAT": [
            {"id": "e1", "key": "PLAT-1", "name": "Kickoff", "status": "Done",
             "startDate": "2024-03-01", "dueDate": "2024-04-15T00:00:00.000Z"}
        ]
    }
}"#;

#[tokio::test]
async fn test_static_directory_serves_fixture() {
    let directory: StaticDirectory = StaticDirectory::new(create_test_fixture());

    let users: Vec<User> = directory.fetch_users().await.unwrap();
    let web: Vec<Epic> = directory.fetch_epics("WEB").await.unwrap();
    let unknown: Vec<Epic> = directory.fetch_epics("NOPE").await.unwrap();

    assert_eq!(users.len(), 3);
    assert_eq!(web.len(), 2);
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_file_directory_reads_fixture() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE_JSON.as_bytes()).unwrap();
    let directory: FileDirectory = FileDirectory::new(file.path());

    let fetch: DirectoryFetch = fetch_directory(&directory, &[]).await;

    assert!(fetch.notices.is_empty());
    assert_eq!(fetch.users.unwrap()[0].name, "Dana");
    let projects = fetch.projects.unwrap();
    assert_eq!(projects[0].key, "PLAT");
    let epics: &Vec<Epic> = fetch.epics.get(&projects[0].id).unwrap();
    assert_eq!(epics[0].end_date.as_deref(), Some("2024-04-15T00:00:00.000Z"));
}

#[tokio::test]
async fn test_missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let directory: FileDirectory = FileDirectory::new(dir.path().join("absent.json"));

    let result = directory.fetch_users().await;

    assert!(matches!(result, Err(DirectoryError::Unavailable(_))));
}

#[tokio::test]
async fn test_malformed_file_is_invalid_response() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"users\": 42 }").unwrap();
    let directory: FileDirectory = FileDirectory::new(file.path());

    let result = directory.fetch_projects().await;

    assert!(matches!(result, Err(DirectoryError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_proxy_produces_notices() {
    // Port 9 (discard) is not expected to accept HTTP connections
    let directory: HttpDirectory = HttpDirectory::new("http://127.0.0.1:9/api/").unwrap();

    let fetch: DirectoryFetch = fetch_directory(&directory, &[]).await;

    assert!(fetch.users.is_none());
    assert!(fetch.projects.is_none());
    assert_eq!(fetch.notices.len(), 2);
    assert_eq!(fetch.notices[0].source, FetchSource::Users);
}

#[test]
fn test_proxy_endpoints_encode_project_keys() {
    let directory: HttpDirectory = HttpDirectory::new("http://127.0.0.1:3001/api/").unwrap();

    let users = directory.endpoint(&["users"]).unwrap();
    let epics = directory.endpoint(&["projects", "A B/../C", "epics"]).unwrap();

    assert_eq!(users.as_str(), "http://127.0.0.1:3001/api/users");
    assert_eq!(
        epics.as_str(),
        "http://127.0.0.1:3001/api/projects/A%20B%2F..%2FC/epics"
    );
}

#[test]
fn test_proxy_base_without_trailing_slash() {
    let directory: HttpDirectory = HttpDirectory::new("http://localhost:3001/api").unwrap();

    let projects = directory.endpoint(&["projects"]).unwrap();

    assert_eq!(projects.as_str(), "http://localhost:3001/api/projects");
}

#[test]
fn test_invalid_proxy_url_is_rejected() {
    assert!(matches!(
        HttpDirectory::new("not a url"),
        Err(DirectoryError::Unavailable(_))
    ));
}
