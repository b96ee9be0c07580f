// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project timeline aggregation.
//!
//! A project's timeline is derived from its epics: the earliest parseable
//! start and the latest parseable end. Timelines are recomputed from scratch
//! whenever a project's epic list is loaded; there is no incremental update.

use crate::calendar::parse_calendar_date;
use crate::types::{Epic, Project, Timeline};
use chrono::NaiveDate;

/// Computes a project's timeline from its epics.
///
/// Missing and unparseable dates are discarded. Returns `None` when no epic
/// has a usable start date or none has a usable end date, or when the
/// earliest start falls after the latest end.
#[must_use]
pub fn compute_project_timeline(epics: &[Epic]) -> Option<Timeline> {
    let start: Option<NaiveDate> = epics
        .iter()
        .filter_map(|epic| epic.start_date.as_deref())
        .filter_map(|raw| parse_calendar_date(raw).ok())
        .min();
    let end: Option<NaiveDate> = epics
        .iter()
        .filter_map(|epic| epic.end_date.as_deref())
        .filter_map(|raw| parse_calendar_date(raw).ok())
        .max();

    Timeline::new(start?, end?).ok()
}

/// Chooses the timeline to display for a project.
///
/// The epic-derived timeline wins; otherwise the project's own declared dates
/// are used.
#[must_use]
pub fn resolve_project_timeline(computed: Option<Timeline>, project: &Project) -> Option<Timeline> {
    computed.or_else(|| project.declared_timeline())
}
