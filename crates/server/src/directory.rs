// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory clients for the issue tracker's users, projects and epics.
//!
//! - [`HttpDirectory`] talks to the tracker proxy (`/users`, `/projects`,
//!   `/projects/{key}/epics`)
//! - [`FileDirectory`] reads a JSON fixture on every fetch
//! - [`StaticDirectory`] serves a fixture held in memory

use async_trait::async_trait;
use planboard::{Directory, DirectoryError};
use planboard_domain::{Epic, Project, User};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout for the tracker proxy.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory data as stored in a fixture file.
///
/// Epics are keyed by project key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DirectoryFixture {
    /// Every user.
    #[serde(default)]
    pub users: Vec<User>,
    /// Every project.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Epics per project key.
    #[serde(default)]
    pub epics: BTreeMap<String, Vec<Epic>>,
}

impl DirectoryFixture {
    fn epics_for(&self, project_key: &str) -> Vec<Epic> {
        self.epics.get(project_key).cloned().unwrap_or_default()
    }
}

/// A directory served from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    fixture: DirectoryFixture,
}

impl StaticDirectory {
    /// Creates a directory serving `fixture`.
    #[must_use]
    pub const fn new(fixture: DirectoryFixture) -> Self {
        Self { fixture }
    }
}

#[async_trait]
impl Directory for StaticDirectory {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.fixture.users.clone())
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.fixture.projects.clone())
    }

    async fn fetch_epics(&self, project_key: &str) -> Result<Vec<Epic>, DirectoryError> {
        Ok(self.fixture.epics_for(project_key))
    }
}

/// A directory read from a JSON fixture file.
///
/// The file is re-read on every fetch so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    /// Creates a directory backed by the fixture at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<DirectoryFixture, DirectoryError> {
        let raw: String = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DirectoryError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            DirectoryError::InvalidResponse(format!("{}: {e}", self.path.display()))
        })
    }
}

#[async_trait]
impl Directory for FileDirectory {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.load().await?.users)
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.load().await?.projects)
    }

    async fn fetch_epics(&self, project_key: &str) -> Result<Vec<Epic>, DirectoryError> {
        Ok(self.load().await?.epics_for(project_key))
    }
}

/// A directory backed by the tracker proxy's REST API.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Creates a client for the proxy at `base_url` (e.g. `http://localhost:3001/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a usable base URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, DirectoryError> {
        let base_url: Url = Url::parse(base_url).map_err(|e| {
            DirectoryError::Unavailable(format!("Invalid directory URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::Unavailable(format!(
                "Directory URL '{base_url}' cannot be a base"
            )));
        }

        let client: Client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DirectoryError::Unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Builds the URL of an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded, so a project key can never change the
    /// path structure.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url: Url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DirectoryError::Unavailable(format!(
                    "Directory URL '{}' cannot be a base",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, DirectoryError> {
        let url: Url = self.endpoint(segments)?;
        debug!(%url, "Fetching from directory");

        let response: reqwest::Response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DirectoryError::Unavailable(format!("{url}: {e}")))?;

        let status: reqwest::StatusCode = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DirectoryError::InvalidResponse(format!("{url}: {e}")))
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn fetch_users(&self) -> Result<Vec<User>, DirectoryError> {
        self.get_json(&["users"]).await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, DirectoryError> {
        self.get_json(&["projects"]).await
    }

    async fn fetch_epics(&self, project_key: &str) -> Result<Vec<Epic>, DirectoryError> {
        self.get_json(&["projects", project_key, "epics"]).await
    }
}
