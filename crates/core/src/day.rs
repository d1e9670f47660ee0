// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekday resolution across the record shapes returned by the backend.
//!
//! Daily rows identify their day in several ways depending on the RPC
//! version that produced them. [`find_day_data`] runs an ordered chain of
//! resolvers and the first resolver that matches any row wins.

use serde_json::Value;
use time::{Date, Weekday};

use painel_domain::validation::parse_iso_date;

/// Canonical names per weekday, already folded (lowercase, no diacritics).
const DAY_NAMES: [(Weekday, &[&str]); 7] = [
    (Weekday::Monday, &["segunda", "seg", "monday", "mon"]),
    (Weekday::Tuesday, &["terca", "ter", "tuesday", "tue"]),
    (Weekday::Wednesday, &["quarta", "qua", "wednesday", "wed"]),
    (Weekday::Thursday, &["quinta", "qui", "thursday", "thu"]),
    (Weekday::Friday, &["sexta", "sex", "friday", "fri"]),
    (Weekday::Saturday, &["sabado", "sab", "saturday", "sat"]),
    (Weekday::Sunday, &["domingo", "dom", "sunday", "sun"]),
];

/// Weekdays in presentation order.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// A single day-matching strategy.
pub type DayResolver = fn(Weekday, &Value) -> bool;

/// Resolvers in priority order.
pub const DAY_RESOLVERS: [DayResolver; 4] = [
    match_by_name,
    match_by_iso_day,
    match_by_date,
    match_by_alternate_name,
];

/// Finds the row describing `day_ref`.
///
/// `day_ref` is a weekday name in Portuguese or English (any case, with or
/// without diacritics or the `-feira` suffix) or an ISO day number
/// (`"1"` = Monday). Returns `None` when the reference is not a weekday or
/// no row matches, which callers treat as "no data for that day".
#[must_use]
pub fn find_day_data<'a>(day_ref: &str, rows: &'a [Value]) -> Option<&'a Value> {
    let day: Weekday = parse_weekday(day_ref)?;
    find_weekday_data(day, rows)
}

/// Finds the row describing `day`. See [`find_day_data`].
#[must_use]
pub fn find_weekday_data(day: Weekday, rows: &[Value]) -> Option<&Value> {
    DAY_RESOLVERS
        .iter()
        .find_map(|resolver| rows.iter().find(|row| resolver(day, row)))
}

/// Matches the `dia_da_semana` name field.
#[must_use]
pub fn match_by_name(day: Weekday, row: &Value) -> bool {
    name_field_matches(day, row, &["dia_da_semana"])
}

/// Matches the `dia_iso` field (1 = Monday .. 7 = Sunday).
#[must_use]
pub fn match_by_iso_day(day: Weekday, row: &Value) -> bool {
    let iso: Option<i64> = match row.get("dia_iso") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    iso.and_then(weekday_from_iso) == Some(day)
}

/// Matches the weekday of a `data`/`date` field.
#[must_use]
pub fn match_by_date(day: Weekday, row: &Value) -> bool {
    ["data", "date"]
        .iter()
        .filter_map(|key| row.get(*key).and_then(Value::as_str))
        .filter_map(|text| text.get(..10).and_then(parse_iso_date))
        .any(|date: Date| date.weekday() == day)
}

/// Matches the alternate `dia`/`day_name` name fields.
#[must_use]
pub fn match_by_alternate_name(day: Weekday, row: &Value) -> bool {
    name_field_matches(day, row, &["dia", "day_name"])
}

fn name_field_matches(day: Weekday, row: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| row.get(*key).and_then(Value::as_str))
        .any(|name| parse_weekday_name(name) == Some(day))
}

/// Parses a weekday from a name or an ISO day number.
#[must_use]
pub fn parse_weekday(day_ref: &str) -> Option<Weekday> {
    parse_weekday_name(day_ref).or_else(|| {
        day_ref
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(weekday_from_iso)
    })
}

/// Parses a Portuguese or English weekday name.
#[must_use]
pub fn parse_weekday_name(name: &str) -> Option<Weekday> {
    let folded: String = fold_diacritics(name.trim()).to_lowercase();
    let base: &str = folded
        .strip_suffix("-feira")
        .or_else(|| folded.strip_suffix(" feira"))
        .unwrap_or(&folded)
        .trim();

    DAY_NAMES
        .iter()
        .find(|(_, names)| names.contains(&base))
        .map(|(day, _)| *day)
}

/// Converts an ISO day number (1 = Monday .. 7 = Sunday).
#[must_use]
pub fn weekday_from_iso(iso: i64) -> Option<Weekday> {
    usize::try_from(iso - 1)
        .ok()
        .and_then(|index| WEEK_ORDER.get(index))
        .copied()
}

/// Returns the Portuguese display name of a weekday.
#[must_use]
pub const fn portuguese_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Segunda",
        Weekday::Tuesday => "Terça",
        Weekday::Wednesday => "Quarta",
        Weekday::Thursday => "Quinta",
        Weekday::Friday => "Sexta",
        Weekday::Saturday => "Sábado",
        Weekday::Sunday => "Domingo",
    }
}

/// Strips the Portuguese diacritics from `text`.
#[must_use]
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}
