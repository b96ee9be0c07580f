// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a user in the external directory.
///
/// Directory ids are opaque strings (account ids, numeric ids rendered as text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyIdentifier { kind: "user" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a project in the external issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new `ProjectId`.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyIdentifier { kind: "project" });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person from the external directory.
///
/// Users are never mutated by the core; they are only referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The directory identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (may be empty when the directory hides it).
    #[serde(default)]
    pub email: String,
    /// Job role, e.g. "Developer".
    #[serde(default)]
    pub role: String,
}

impl User {
    /// Creates a new `User`.
    #[must_use]
    pub fn new(id: UserId, name: &str, email: &str, role: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

/// A project from the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The tracker's project identifier.
    pub id: ProjectId,
    /// The short project key used to query epics (e.g. "PROJ1").
    pub key: String,
    /// Display name.
    pub name: String,
    /// Display name of the project lead.
    #[serde(default)]
    pub lead: String,
    /// Declared start date, used when no epic yields a timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Declared end date, used when no epic yields a timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Project {
    /// Creates a new `Project` without declared dates.
    #[must_use]
    pub fn new(id: ProjectId, key: &str, name: &str, lead: &str) -> Self {
        Self {
            id,
            key: key.to_string(),
            name: name.to_string(),
            lead: lead.to_string(),
            start_date: None,
            end_date: None,
        }
    }

    /// Returns a copy of this project with declared dates set.
    #[must_use]
    pub fn with_declared_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Returns the timeline declared on the project itself, if both dates are
    /// present and ordered.
    #[must_use]
    pub fn declared_timeline(&self) -> Option<Timeline> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Timeline::new(start, end).ok(),
            _ => None,
        }
    }
}

/// An epic belonging to a project.
///
/// Epic dates are carried as raw strings from the tracker; they are parsed
/// only when a timeline is aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    /// The tracker's issue identifier.
    pub id: String,
    /// The issue key (e.g. "PROJ1-12").
    #[serde(default)]
    pub key: String,
    /// Summary line.
    #[serde(default)]
    pub name: String,
    /// Workflow status name.
    #[serde(default)]
    pub status: String,
    /// Raw start date, if any.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Raw end (due) date, if any.
    #[serde(default, alias = "dueDate")]
    pub end_date: Option<String>,
}

impl Epic {
    /// Creates an epic with the given raw dates.
    #[must_use]
    pub fn new(id: &str, start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            key: String::new(),
            name: String::new(),
            status: String::new(),
            start_date: start_date.map(ToString::to_string),
            end_date: end_date.map(ToString::to_string),
        }
    }
}

/// A derived date range describing when a project's work happens.
///
/// Invariant: `start_date <= end_date` and `duration_days` is the inclusive
/// day count between them. Deserialization goes through [`Timeline::new`], so
/// a stored `durationDays` is recomputed and inverted ranges are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TimelineRecord")]
pub struct Timeline {
    /// First day of the timeline.
    pub start_date: NaiveDate,
    /// Last day of the timeline (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive number of days covered.
    pub duration_days: i64,
}

impl Timeline {
    /// Creates a timeline, computing its inclusive duration.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvertedTimeline { start, end });
        }
        Ok(Self {
            start_date: start,
            end_date: end,
            duration_days: (end - start).num_days() + 1,
        })
    }

    /// Returns whether `date` lies within the timeline (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Wire form of a [`Timeline`] before its invariant is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRecord {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<TimelineRecord> for Timeline {
    type Error = DomainError;

    fn try_from(record: TimelineRecord) -> Result<Self, Self::Error> {
        Self::new(record.start_date, record.end_date)
    }
}

/// A user's assignment to a project for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// The project the user is assigned to.
    pub project_id: ProjectId,
    /// The assigned user.
    pub user_id: UserId,
    /// First day of the assignment.
    pub start_date: NaiveDate,
    /// Last day of the assignment (inclusive).
    pub end_date: NaiveDate,
    /// When the assignment was created or last re-dated.
    pub assigned_at: DateTime<Utc>,
}

/// Calendar resolution of a timeline grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One column per day.
    #[default]
    Day,
    /// One column per 7-day step.
    Week,
    /// One column per calendar month.
    Month,
    /// One column per calendar year.
    Year,
}

impl Resolution {
    /// All resolutions, finest first.
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    /// Converts this resolution to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl FromStr for Resolution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DomainError::InvalidResolution(s.to_string())),
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
