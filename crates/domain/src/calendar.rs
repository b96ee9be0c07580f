// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar grid generation for timeline views.
//!
//! A grid is an ordered list of [`Column`]s covering a date range at one of
//! four resolutions. Every column knows the span of calendar days it
//! represents, which is what the overlap evaluator tests against.
//!
//! ## Invariants
//!
//! - All arithmetic is done on calendar dates (`NaiveDate`), never on
//!   instants, so daylight-saving and timezone offsets cannot move a
//!   boundary
//! - A non-inverted range always yields at least one column
//! - The last column's span always contains `range_end`
//! - Generation is deterministic and side-effect free

use crate::error::DomainError;
use crate::types::Resolution;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One column of a calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// The resolution this column was generated at.
    pub resolution: Resolution,
    /// Anchor date: the day, the first day of the week step, or the first
    /// day of the month/year.
    pub date: NaiveDate,
    /// Short header label (`5`, `W3`, `Jul`, `2024`).
    pub label: String,
    /// Long label suitable for a tooltip.
    pub full_label: String,
    /// Grouping key for alternating shading.
    pub period_index: u32,
    /// Whether the anchor date falls on a Saturday or Sunday.
    pub is_weekend: bool,
    /// Whether this column opens a new period group.
    pub is_period_start: bool,
}

impl Column {
    /// Returns the inclusive span of days this column represents.
    #[must_use]
    pub fn span(&self) -> (NaiveDate, NaiveDate) {
        match self.resolution {
            Resolution::Day => (self.date, self.date),
            Resolution::Week => (
                self.date,
                self.date
                    .checked_add_days(Days::new(6))
                    .unwrap_or(NaiveDate::MAX),
            ),
            Resolution::Month => (first_of_month(self.date), last_of_month(self.date)),
            Resolution::Year => (
                NaiveDate::from_ymd_opt(self.date.year(), 1, 1).unwrap_or(self.date),
                NaiveDate::from_ymd_opt(self.date.year(), 12, 31).unwrap_or(self.date),
            ),
        }
    }
}

/// Generates the grid columns for a date range.
///
/// Returns an empty vector when `range_start > range_end`. The length of the
/// output is proportional to the range; callers must bound it.
#[must_use]
pub fn generate_columns(
    range_start: NaiveDate,
    range_end: NaiveDate,
    resolution: Resolution,
) -> Vec<Column> {
    if range_start > range_end {
        return Vec::new();
    }

    match resolution {
        Resolution::Day => day_columns(range_start, range_end),
        Resolution::Week => week_columns(range_start, range_end),
        Resolution::Month => month_columns(range_start, range_end),
        Resolution::Year => year_columns(range_start, range_end),
    }
}

/// Counts the columns `generate_columns` would produce without allocating them.
#[must_use]
pub fn column_count(range_start: NaiveDate, range_end: NaiveDate, resolution: Resolution) -> u64 {
    if range_start > range_end {
        return 0;
    }
    let days: u64 = u64::try_from((range_end - range_start).num_days()).unwrap_or(0) + 1;
    let months = |start: NaiveDate, end: NaiveDate| -> u64 {
        let span: i64 = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
            - i64::from(start.month());
        u64::try_from(span).unwrap_or(0) + 1
    };
    match resolution {
        Resolution::Day => days,
        Resolution::Week => days.div_ceil(7),
        Resolution::Month => months(range_start, range_end),
        Resolution::Year => u64::try_from(range_end.year() - range_start.year()).unwrap_or(0) + 1,
    }
}

fn day_columns(range_start: NaiveDate, range_end: NaiveDate) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut period: u32 = 0;
    let mut previous_month: Option<u32> = None;

    for date in range_start.iter_days().take_while(|d| *d <= range_end) {
        let month_changed: bool = previous_month.is_some_and(|m| m != date.month());
        if month_changed {
            period += 1;
        }
        previous_month = Some(date.month());

        columns.push(Column {
            resolution: Resolution::Day,
            date,
            label: date.day().to_string(),
            full_label: date.format("%a %b %-d, %Y").to_string(),
            period_index: period,
            is_weekend: is_weekend(date),
            is_period_start: columns.is_empty() || month_changed,
        });
    }

    columns
}

fn week_columns(range_start: NaiveDate, range_end: NaiveDate) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut period: u32 = 0;
    let mut previous_month: Option<u32> = None;
    let mut week_number: u32 = 1;

    for date in range_start.iter_weeks().take_while(|d| *d <= range_end) {
        let month_changed: bool = previous_month.is_some_and(|m| m != date.month());
        if month_changed {
            period += 1;
        }
        previous_month = Some(date.month());

        columns.push(Column {
            resolution: Resolution::Week,
            date,
            label: format!("W{week_number}"),
            full_label: format!("Week {week_number}"),
            period_index: period,
            is_weekend: is_weekend(date),
            is_period_start: columns.is_empty() || month_changed,
        });
        week_number += 1;
    }

    columns
}

fn month_columns(range_start: NaiveDate, range_end: NaiveDate) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut anchor: NaiveDate = first_of_month(range_start);
    let mut period: u32 = 0;

    while anchor <= range_end {
        columns.push(Column {
            resolution: Resolution::Month,
            date: anchor,
            label: anchor.format("%b").to_string(),
            full_label: anchor.format("%B %Y").to_string(),
            period_index: period,
            is_weekend: is_weekend(anchor),
            is_period_start: true,
        });
        period += 1;
        match anchor.checked_add_months(Months::new(1)) {
            Some(next) => anchor = next,
            None => break,
        }
    }

    columns
}

fn year_columns(range_start: NaiveDate, range_end: NaiveDate) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut period: u32 = 0;

    for year in range_start.year()..=range_end.year() {
        let Some(anchor) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            continue;
        };
        columns.push(Column {
            resolution: Resolution::Year,
            date: anchor,
            label: format!("{year:04}"),
            full_label: format!("{year:04}"),
            period_index: period,
            is_weekend: is_weekend(anchor),
            is_period_start: true,
        });
        period += 1;
    }

    columns
}

/// Returns whether the date is a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the first day of the date's month.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of the date's month.
#[must_use]
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|day| day.pred_opt())
        .unwrap_or(date)
}

/// Parses a calendar date from tracker data.
///
/// Accepts `YYYY-MM-DD` and timestamps whose date part precedes a `T`
/// (`2024-01-10T09:00:00.000+0000`). Only the calendar date is kept.
///
/// # Errors
///
/// Returns an error if the value has no parseable calendar date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, DomainError> {
    let trimmed: &str = value.trim();
    let date_part: &str = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns an error if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Returns the calendar date of `now` as observed in `tz`.
///
/// Assignment status ("today", "ending soon") is always evaluated against
/// this local date rather than the UTC date.
#[must_use]
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}
