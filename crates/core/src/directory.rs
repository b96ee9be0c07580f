// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The external directory of users, projects and epics.
//!
//! Fetches may fail at any time. A failed fetch never clears data the
//! session already holds; it produces a [`FetchNotice`] instead.

use async_trait::async_trait;
use futures::future::join_all;
use planboard_domain::{Epic, Project, ProjectId, User};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Errors reported by a directory implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
    /// The directory answered with an error status.
    #[error("Directory returned status {status}: {message}")]
    Status {
        /// The status code returned.
        status: u16,
        /// The response body or reason phrase.
        message: String,
    },
    /// The directory's response could not be decoded.
    #[error("Invalid directory response: {0}")]
    InvalidResponse(String),
}

/// Source of users, projects and epics.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Fetches every user.
    async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError>;

    /// Fetches every project.
    async fn fetch_projects(&self) -> Result<Vec<Project>, DirectoryError>;

    /// Fetches the epics of the project with the given key.
    async fn fetch_epics(&self, project_key: &str) -> Result<Vec<Epic>, DirectoryError>;
}

/// Which fetch a notice refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchSource {
    /// The user list.
    Users,
    /// The project list.
    Projects,
    /// One project's epics.
    Epics {
        /// The project whose epics failed to load.
        project_key: String,
    },
}

/// A non-fatal report that a fetch failed and previous data was kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchNotice {
    /// What was being fetched.
    pub source: FetchSource,
    /// The failure message.
    pub message: String,
}

impl FetchNotice {
    fn new(source: FetchSource, error: &DirectoryError) -> Self {
        warn!(?source, %error, "Directory fetch failed; keeping previous data");
        Self {
            source,
            message: error.to_string(),
        }
    }
}

/// The outcome of one directory refresh.
///
/// `None` lists mean the fetch failed; callers keep what they had.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFetch {
    /// Freshly fetched users.
    pub users: Option<Vec<User>>,
    /// Freshly fetched projects.
    pub projects: Option<Vec<Project>>,
    /// Freshly fetched epics, only for projects whose fetch succeeded.
    pub epics: BTreeMap<ProjectId, Vec<Epic>>,
    /// One notice per failed fetch.
    pub notices: Vec<FetchNotice>,
}

/// Fetches users, projects and every project's epics.
///
/// Epic lookups run concurrently. When the project list itself cannot be
/// fetched, epics are refreshed for `known_projects` instead.
pub async fn fetch_directory(
    directory: &dyn Directory,
    known_projects: &[Project],
) -> DirectoryFetch {
    let mut fetch: DirectoryFetch = DirectoryFetch::default();

    match directory.fetch_users().await {
        Ok(users) => fetch.users = Some(users),
        Err(error) => fetch.notices.push(FetchNotice::new(FetchSource::Users, &error)),
    }

    match directory.fetch_projects().await {
        Ok(projects) => fetch.projects = Some(projects),
        Err(error) => fetch
            .notices
            .push(FetchNotice::new(FetchSource::Projects, &error)),
    }

    let projects: &[Project] = fetch.projects.as_deref().unwrap_or(known_projects);
    let lookups = projects.iter().map(|project| async move {
        (project, directory.fetch_epics(&project.key).await)
    });
    let results: Vec<(&Project, Result<Vec<Epic>, DirectoryError>)> = join_all(lookups).await;

    let mut epics: BTreeMap<ProjectId, Vec<Epic>> = BTreeMap::new();
    let mut notices: Vec<FetchNotice> = Vec::new();
    for (project, result) in results {
        match result {
            Ok(list) => {
                epics.insert(project.id.clone(), list);
            }
            Err(error) => notices.push(FetchNotice::new(
                FetchSource::Epics {
                    project_key: project.key.clone(),
                },
                &error,
            )),
        }
    }
    fetch.epics = epics;
    fetch.notices.extend(notices);

    debug!(
        users = fetch.users.as_ref().map(Vec::len),
        projects = fetch.projects.as_ref().map(Vec::len),
        epic_lists = fetch.epics.len(),
        notices = fetch.notices.len(),
        "Directory fetch finished"
    );
    fetch
}
