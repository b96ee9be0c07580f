// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment_status;
mod calendar;
mod directory;
mod error;
mod overlap;
mod timeline;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment_status::{AssignmentStatus, ENDING_SOON_WINDOW_DAYS};
pub use calendar::{
    Column, column_count, first_of_month, generate_columns, is_weekend, last_of_month,
    local_today, parse_calendar_date, parse_timezone,
};
pub use directory::{search_projects, search_users};
pub use overlap::{activity_row, is_active};
pub use timeline::{compute_project_timeline, resolve_project_timeline};

// Re-export public types
pub use chrono_tz::Tz;
pub use error::DomainError;
pub use types::{Assignment, Epic, Project, ProjectId, Resolution, Timeline, User, UserId};
pub use validation::{parse_assignment_dates, validate_assignment_dates, validate_date_order};
