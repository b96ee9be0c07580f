// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search and ordering of directory listings.
//!
//! User and project panels filter by a free-text term and order their
//! results so that entries whose *name* matches come first, followed by the
//! remaining matches; both groups are sorted alphabetically by name.

use crate::types::{Project, User};
use std::cmp::Ordering;

fn matches(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

fn search_order(a_name: &str, b_name: &str, needle: &str) -> Ordering {
    if !needle.is_empty() {
        let a_hit: bool = matches(a_name, needle);
        let b_hit: bool = matches(b_name, needle);
        if a_hit != b_hit {
            return b_hit.cmp(&a_hit);
        }
    }
    a_name.to_lowercase().cmp(&b_name.to_lowercase())
}

/// Filters users whose name, email or role contains `term` (case-insensitive)
/// and orders them name-matches first, then alphabetically.
///
/// An empty term returns every user, alphabetically.
#[must_use]
pub fn search_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle: String = term.trim().to_lowercase();
    let mut found: Vec<&User> = users
        .iter()
        .filter(|user| {
            needle.is_empty()
                || matches(&user.name, &needle)
                || matches(&user.email, &needle)
                || matches(&user.role, &needle)
        })
        .collect();
    found.sort_by(|a, b| search_order(&a.name, &b.name, &needle));
    found
}

/// Filters projects whose name, key or lead contains `term`
/// (case-insensitive) and orders them name-matches first, then
/// alphabetically.
#[must_use]
pub fn search_projects<'a>(projects: &'a [Project], term: &str) -> Vec<&'a Project> {
    let needle: String = term.trim().to_lowercase();
    let mut found: Vec<&Project> = projects
        .iter()
        .filter(|project| {
            needle.is_empty()
                || matches(&project.name, &needle)
                || matches(&project.key, &needle)
                || matches(&project.lead, &needle)
        })
        .collect();
    found.sort_by(|a, b| search_order(&a.name, &b.name, &needle));
    found
}
