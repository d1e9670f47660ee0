// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use time::{Date, Weekday};

#[allow(clippy::expect_used)]
static YEAR_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})").expect("year pattern is valid"));

#[allow(clippy::expect_used)]
static WEEK_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"W(\d+)").expect("week pattern is valid"));

/// A year plus ISO week number, as selected for comparison.
///
/// Ordered by year, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekIdentifier {
    /// Calendar year of the week.
    pub year: i32,
    /// ISO week number.
    pub week_number: u32,
}

impl WeekIdentifier {
    /// Creates a new week identifier.
    #[must_use]
    pub const fn new(year: i32, week_number: u32) -> Self {
        Self { year, week_number }
    }

    /// Parses a week label.
    ///
    /// Labels containing `W` (`"2025-W45"`, `"S2025-W45"`) carry the week
    /// after the `W` and optionally a four-digit year; plain numeric labels
    /// (`"45"`) are a week number alone. A missing year defaults to
    /// `current_year`.
    ///
    /// Returns `None` if no week number can be read.
    #[must_use]
    pub fn parse(input: &str, current_year: i32) -> Option<Self> {
        let label: String = input.trim().to_ascii_uppercase();

        if label.contains('W') {
            let week_number: u32 = WEEK_PART
                .captures(&label)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())?;
            let year: i32 = YEAR_PART
                .captures(&label)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(current_year);
            return Some(Self::new(year, week_number));
        }

        label
            .parse::<u32>()
            .ok()
            .map(|week_number| Self::new(current_year, week_number))
    }

    /// Reads a week identifier from a loosely shaped JSON value.
    ///
    /// Accepts labels, bare week numbers, and objects with `ano`/`year` and
    /// `semana`/`week` (or `semana_numero`) fields.
    #[must_use]
    pub fn from_value(value: &Value, current_year: i32) -> Option<Self> {
        match value {
            Value::String(label) => Self::parse(label, current_year),
            Value::Number(n) => n
                .as_u64()
                .and_then(|week| u32::try_from(week).ok())
                .map(|week| Self::new(current_year, week)),
            Value::Object(fields) => {
                let week_field: &Value = ["semana", "week", "semana_numero", "week_number"]
                    .iter()
                    .find_map(|key| fields.get(*key))?;
                let mut parsed: Self = Self::from_value(week_field, current_year)?;
                if let Some(year) = ["ano", "year"]
                    .iter()
                    .find_map(|key| fields.get(*key))
                    .and_then(json_integer)
                    .and_then(|year| i32::try_from(year).ok())
                {
                    parsed.year = year;
                }
                Some(parsed)
            }
            _ => None,
        }
    }

    /// Returns the Monday and Sunday of this ISO week.
    ///
    /// Returns `None` if the week does not exist in the year.
    #[must_use]
    pub fn iso_date_range(&self) -> Option<(Date, Date)> {
        let week: u8 = u8::try_from(self.week_number).ok()?;
        let monday: Date = Date::from_iso_week_date(self.year, week, Weekday::Monday).ok()?;
        let sunday: Date = Date::from_iso_week_date(self.year, week, Weekday::Sunday).ok()?;
        Some((monday, sunday))
    }
}

impl std::fmt::Display for WeekIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week_number)
    }
}

/// Parses a week label, defaulting the year to `current_year`.
///
/// See [`WeekIdentifier::parse`].
#[must_use]
pub fn parse_week_string(input: &str, current_year: i32) -> Option<WeekIdentifier> {
    WeekIdentifier::parse(input, current_year)
}

fn json_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
