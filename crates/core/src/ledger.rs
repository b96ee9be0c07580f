// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The assignment ledger.
//!
//! The ledger is the authoritative record of who is assigned to which
//! project and for what dates. It maps each project to an ordered sequence
//! of assignments, in the order they were first made.
//!
//! ## Invariants
//!
//! - At most one assignment exists per `(project_id, user_id)` pair
//! - A user may hold assignments in several projects at once
//! - Projects with no assignments have no entry
//! - Reads never mutate; expired records stay until an explicit reap
//!
//! Mutation is crate-private and reached through [`crate::apply`].

use chrono::NaiveDate;
use planboard_domain::{Assignment, AssignmentStatus, ProjectId, User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A user whose assignment ends within the ending-soon window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndingSoonUser {
    /// The user.
    pub user: User,
    /// The project of the earliest-ending qualifying assignment.
    pub project_id: ProjectId,
    /// The earliest qualifying end date.
    pub end_date: NaiveDate,
}

type ProjectEntries = BTreeMap<ProjectId, Vec<Assignment>>;

/// Mapping from project to its ordered assignments.
///
/// Serialized as a JSON object keyed by project id. Loading normalizes the
/// data: duplicate pairs collapse to the last record and empty entries are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ProjectEntries", into = "ProjectEntries")]
pub struct Ledger {
    projects: ProjectEntries,
}

impl From<ProjectEntries> for Ledger {
    fn from(entries: ProjectEntries) -> Self {
        Self::from_assignments(entries.into_values().flatten())
    }
}

impl From<Ledger> for ProjectEntries {
    fn from(ledger: Ledger) -> Self {
        ledger.projects
    }
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            projects: BTreeMap::new(),
        }
    }

    /// Builds a ledger from a flat list of assignments.
    ///
    /// Later records for the same pair replace earlier ones.
    #[must_use]
    pub fn from_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let mut ledger: Self = Self::new();
        for assignment in assignments {
            ledger.upsert(assignment);
        }
        ledger
    }

    /// Inserts an assignment or replaces the record for the same pair in place.
    ///
    /// Returns the replaced record, if any. Date ordering is checked by
    /// [`crate::apply`] before this is reached.
    pub(crate) fn upsert(&mut self, assignment: Assignment) -> Option<Assignment> {
        let entries: &mut Vec<Assignment> = self
            .projects
            .entry(assignment.project_id.clone())
            .or_default();

        match entries
            .iter_mut()
            .find(|existing| existing.user_id == assignment.user_id)
        {
            Some(existing) => Some(std::mem::replace(existing, assignment)),
            None => {
                entries.push(assignment);
                None
            }
        }
    }

    /// Removes the assignment for a pair. Absent pairs are a no-op.
    pub(crate) fn remove(
        &mut self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Option<Assignment> {
        let entries: &mut Vec<Assignment> = self.projects.get_mut(project_id)?;
        let index: usize = entries.iter().position(|a| &a.user_id == user_id)?;
        let removed: Assignment = entries.remove(index);
        if entries.is_empty() {
            self.projects.remove(project_id);
        }
        Some(removed)
    }

    /// Removes every expired assignment and returns what was removed.
    pub(crate) fn reap_expired(&mut self, today: NaiveDate) -> Vec<Assignment> {
        let mut removed: Vec<Assignment> = Vec::new();
        for entries in self.projects.values_mut() {
            let (expired, kept): (Vec<Assignment>, Vec<Assignment>) = std::mem::take(entries)
                .into_iter()
                .partition(|a| !AssignmentStatus::evaluate(a.end_date, today).is_current());
            *entries = kept;
            removed.extend(expired);
        }
        self.projects.retain(|_, entries| !entries.is_empty());
        removed
    }

    /// Returns the assignment for a pair, if any.
    #[must_use]
    pub fn get(&self, project_id: &ProjectId, user_id: &UserId) -> Option<&Assignment> {
        self.projects
            .get(project_id)?
            .iter()
            .find(|a| &a.user_id == user_id)
    }

    /// Iterates every assignment, grouped by project.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.projects.values().flatten()
    }

    /// Returns the assignments of a project in insertion order.
    #[must_use]
    pub fn assignments_for_project(&self, project_id: &ProjectId) -> &[Assignment] {
        self.projects.get(project_id).map_or(&[], Vec::as_slice)
    }

    /// Returns every assignment a user holds, earliest start first.
    #[must_use]
    pub fn assignments_for_user(&self, user_id: &UserId) -> Vec<&Assignment> {
        let mut found: Vec<&Assignment> = self.iter().filter(|a| &a.user_id == user_id).collect();
        found.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.project_id.cmp(&b.project_id))
        });
        found
    }

    /// Returns the projects that have at least one assignment.
    pub fn project_ids(&self) -> impl Iterator<Item = &ProjectId> {
        self.projects.keys()
    }

    /// Returns users holding no assignment anywhere, in directory order.
    ///
    /// A user whose only records are expired is not available until those
    /// records are reaped.
    #[must_use]
    pub fn available_users<'a>(&self, all_users: &'a [User]) -> Vec<&'a User> {
        let holders: BTreeSet<&UserId> = self.iter().map(|a| &a.user_id).collect();
        all_users
            .iter()
            .filter(|user| !holders.contains(&user.id))
            .collect()
    }

    /// Returns users holding at least one non-expired assignment, each once,
    /// in directory order.
    #[must_use]
    pub fn assigned_users<'a>(&self, all_users: &'a [User], today: NaiveDate) -> Vec<&'a User> {
        let holders: BTreeSet<&UserId> = self
            .iter()
            .filter(|a| AssignmentStatus::evaluate(a.end_date, today).is_current())
            .map(|a| &a.user_id)
            .collect();
        all_users
            .iter()
            .filter(|user| holders.contains(&user.id))
            .collect()
    }

    /// Returns users with an assignment ending one to three days after
    /// `today`, each once with their earliest such end date, soonest first.
    #[must_use]
    pub fn ending_soon(&self, all_users: &[User], today: NaiveDate) -> Vec<EndingSoonUser> {
        let mut earliest: BTreeMap<&UserId, &Assignment> = BTreeMap::new();
        for assignment in self
            .iter()
            .filter(|a| AssignmentStatus::evaluate(a.end_date, today) == AssignmentStatus::EndingSoon)
        {
            earliest
                .entry(&assignment.user_id)
                .and_modify(|current| {
                    if assignment.end_date < current.end_date {
                        *current = assignment;
                    }
                })
                .or_insert(assignment);
        }

        let mut found: Vec<EndingSoonUser> = all_users
            .iter()
            .filter_map(|user| {
                earliest.get(&user.id).map(|assignment| EndingSoonUser {
                    user: user.clone(),
                    project_id: assignment.project_id.clone(),
                    end_date: assignment.end_date,
                })
            })
            .collect();
        found.sort_by(|a, b| {
            a.end_date
                .cmp(&b.end_date)
                .then_with(|| a.user.name.cmp(&b.user.name))
        });
        found
    }

    /// Returns every assignment whose end date is before `today`.
    #[must_use]
    pub fn expired(&self, today: NaiveDate) -> Vec<&Assignment> {
        self.iter()
            .filter(|a| !AssignmentStatus::evaluate(a.end_date, today).is_current())
            .collect()
    }

    /// Returns the total number of assignments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.values().map(Vec::len).sum()
    }

    /// Returns whether the ledger holds no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
