// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Year, week and date range validation.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use time::Date;
use time::macros::{date, format_description};

use super::common::validate_integer;
use super::field;
use crate::error::ValidationError;
use crate::wire;

/// Earliest date for which the backend holds data.
pub const MIN_DATE: Date = date!(2020 - 01 - 01);

/// Inclusive year bounds.
pub const YEAR_RANGE: (i64, i64) = (2000, 2100);

/// Inclusive ISO week bounds.
pub const WEEK_RANGE: (i64, i64) = (1, 53);

#[allow(clippy::expect_used)]
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid"));

/// Validated period fields of a filter payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilters {
    /// Validated year.
    pub year: Option<i32>,
    /// Validated ISO week.
    pub week: Option<u32>,
    /// Inclusive start date.
    pub date_start: Option<Date>,
    /// Inclusive end date.
    pub date_end: Option<Date>,
}

/// Validates the year, week and date range fields of a payload.
///
/// When only one date bound is present, both bounds are set to it so the
/// result is a closed single-day range.
///
/// # Arguments
///
/// * `payload` - The raw payload object
/// * `today` - The current date, used as the upper bound for dates
///
/// # Errors
///
/// Returns an error if:
/// - The year is not an integer in 2000..=2100
/// - The week is not an integer in 1..=53
/// - A date is not `YYYY-MM-DD` or not a valid calendar date
/// - A date lies after `today` or before 2020-01-01
/// - The end date precedes the start date
pub fn validate_date_filters(payload: &Value, today: Date) -> Result<DateFilters, ValidationError> {
    let mut filters: DateFilters = DateFilters::default();

    if let Some(raw) = field(payload, wire::YEAR) {
        let year: i64 = validate_integer(raw, YEAR_RANGE.0, YEAR_RANGE.1, "Ano")
            .map_err(|_| ValidationError::InvalidYear)?;
        filters.year = i32::try_from(year).ok();
    }

    if let Some(raw) = field(payload, wire::WEEK) {
        let week: i64 = validate_integer(raw, WEEK_RANGE.0, WEEK_RANGE.1, "Semana")
            .map_err(|_| ValidationError::InvalidWeek)?;
        filters.week = u32::try_from(week).ok();
    }

    let start: Option<Date> = field(payload, wire::DATE_START)
        .map(|raw| validate_date(raw, "Data inicial", today))
        .transpose()?;
    let end: Option<Date> = field(payload, wire::DATE_END)
        .map(|raw| validate_date(raw, "Data final", today))
        .transpose()?;

    let (date_start, date_end) = close_date_range(start, end)?;
    filters.date_start = date_start;
    filters.date_end = date_end;

    Ok(filters)
}

/// Validates a single date value.
///
/// # Errors
///
/// Returns an error if the value is not a `YYYY-MM-DD` string naming a real
/// calendar date within 2020-01-01..=`today`.
pub fn validate_date(raw: &Value, field_name: &str, today: Date) -> Result<Date, ValidationError> {
    let Value::String(text) = raw else {
        return Err(ValidationError::InvalidDate {
            field: field_name.to_string(),
            value: raw.to_string(),
        });
    };

    let date: Date = parse_iso_date(text).ok_or_else(|| ValidationError::InvalidDate {
        field: field_name.to_string(),
        value: text.clone(),
    })?;

    if date > today {
        return Err(ValidationError::DateInFuture {
            field: field_name.to_string(),
        });
    }
    if date < MIN_DATE {
        return Err(ValidationError::DateTooEarly {
            field: field_name.to_string(),
        });
    }

    Ok(date)
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is rejected.
#[must_use]
pub fn parse_iso_date(text: &str) -> Option<Date> {
    if !ISO_DATE.is_match(text) {
        return None;
    }
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

/// Closes a possibly half-open date range.
///
/// A missing bound takes the value of the present one.
///
/// # Errors
///
/// Returns `ValidationError::DateRangeInverted` if `end < start`.
pub fn close_date_range(
    start: Option<Date>,
    end: Option<Date>,
) -> Result<(Option<Date>, Option<Date>), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::DateRangeInverted),
        (Some(start), None) => Ok((Some(start), Some(start))),
        (None, Some(end)) => Ok((Some(end), Some(end))),
        bounds => Ok(bounds),
    }
}
