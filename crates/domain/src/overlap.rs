// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interval overlap between entities and grid columns.

use crate::calendar::Column;
use chrono::NaiveDate;

/// Returns whether an entity's `[entity_start, entity_end]` interval overlaps
/// the span represented by `column`.
///
/// This is a standard closed-interval overlap test, not containment: a week
/// column is active if any of its seven days is covered. A single-day
/// interval (`entity_start == entity_end`) overlaps the column containing it.
/// An inverted interval overlaps nothing.
#[must_use]
pub fn is_active(column: &Column, entity_start: NaiveDate, entity_end: NaiveDate) -> bool {
    if entity_end < entity_start {
        return false;
    }
    let (span_start, span_end) = column.span();
    entity_start <= span_end && entity_end >= span_start
}

/// Evaluates [`is_active`] for every column, in order.
#[must_use]
pub fn activity_row(columns: &[Column], entity_start: NaiveDate, entity_end: NaiveDate) -> Vec<bool> {
    columns
        .iter()
        .map(|column| is_active(column, entity_start, entity_end))
        .collect()
}
