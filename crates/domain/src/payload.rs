// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Construction of the normalized filter payload sent to the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

use crate::access::scope_venue;
use crate::error::ValidationError;
use crate::types::{FilterMode, FilterModeKind, FilterState, OrganizationScope, UserAccessContext};
use crate::validation::{
    FACET_MAX_ITEMS, FACET_MAX_LENGTH, YEAR_RANGE, close_date_range, parse_iso_date,
    truncate_chars,
};
use crate::week::WeekIdentifier;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The normalized filter object sent to every dashboard RPC.
///
/// Singular facets are comma-joined strings while multi-select facets are
/// arrays. Field order is fixed, so equal payloads serialize to identical
/// bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPayload {
    /// Selected year.
    #[serde(rename = "p_ano", default)]
    pub year: Option<i32>,
    /// Legacy single ISO week.
    #[serde(rename = "p_semana", default)]
    pub week: Option<u32>,
    /// Selected ISO weeks.
    #[serde(rename = "p_semanas", default)]
    pub weeks: Option<Vec<u32>>,
    /// Venue (praça), already scoped to the user.
    #[serde(rename = "p_praca", default)]
    pub venue: Option<String>,
    /// Comma-joined sub-venue selection.
    #[serde(rename = "p_sub_praca", default)]
    pub sub_venue: Option<String>,
    /// Comma-joined origin selection.
    #[serde(rename = "p_origem", default)]
    pub origin: Option<String>,
    /// Comma-joined shift selection.
    #[serde(rename = "p_turno", default)]
    pub shift: Option<String>,
    /// Multi-select sub-venues.
    #[serde(rename = "p_sub_pracas", default)]
    pub sub_venues: Option<Vec<String>>,
    /// Multi-select origins.
    #[serde(rename = "p_origens", default)]
    pub origins: Option<Vec<String>>,
    /// Multi-select shifts.
    #[serde(rename = "p_turnos", default)]
    pub shifts: Option<Vec<String>>,
    /// Active filter mode.
    #[serde(rename = "p_filtro_modo", default)]
    pub mode: FilterModeKind,
    /// Inclusive start date.
    #[serde(rename = "p_data_inicial", with = "iso_date::option", default)]
    pub date_start: Option<Date>,
    /// Inclusive end date.
    #[serde(rename = "p_data_final", with = "iso_date::option", default)]
    pub date_end: Option<Date>,
    /// Organization the request is scoped to; `null` for admins.
    #[serde(rename = "p_organization_id", default)]
    pub organization: OrganizationScope,
}

impl FilterPayload {
    /// Clears the fields that belong to the inactive filter mode.
    pub fn clear_inactive_mode(&mut self) {
        match self.mode {
            FilterModeKind::YearWeek => {
                self.date_start = None;
                self.date_end = None;
            }
            FilterModeKind::DateRange => {
                self.year = None;
                self.week = None;
                self.weeks = None;
            }
        }
    }

    /// Converts this payload into RPC parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_params(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Builds the backend payload for a filter selection.
///
/// Out-of-range or malformed values degrade to `None` instead of failing:
/// - facets prefer the multi-select list (capped at 50, comma-joined) over
///   the legacy single value (truncated to 100 characters)
/// - the week comes from the first multi-selected week when there is one
/// - years outside 2000..=2100 are dropped
/// - the venue is scoped to the user's assigned venues
/// - unparseable date bounds are dropped, a single bound closes the range
/// - fields of the inactive filter mode are cleared
/// - admins are sent without an organization restriction
///
/// # Arguments
///
/// * `state` - The UI filter selection
/// * `user` - The access context of the requesting user, if any
///
/// # Errors
///
/// Returns `ValidationError::DateRangeInverted` if a date range ends before
/// it starts. No other input makes this function fail.
pub fn build_filter_payload(
    state: &FilterState,
    user: Option<&UserAccessContext>,
) -> Result<FilterPayload, ValidationError> {
    let venue: Option<String> = scope_venue(normalize_single(state.venue.as_deref()), user);

    let mut payload: FilterPayload = FilterPayload {
        venue,
        sub_venue: resolve_facet(&state.sub_venues, state.sub_venue.as_deref()),
        origin: resolve_facet(&state.origins, state.origin.as_deref()),
        shift: resolve_facet(&state.shifts, state.shift.as_deref()),
        sub_venues: sanitize_selection(&state.sub_venues),
        origins: sanitize_selection(&state.origins),
        shifts: sanitize_selection(&state.shifts),
        mode: state.mode.kind(),
        organization: OrganizationScope::for_user(user),
        ..FilterPayload::default()
    };

    match &state.mode {
        FilterMode::YearWeek { year, week, weeks } => {
            payload.year = year.filter(|y| (YEAR_RANGE.0..=YEAR_RANGE.1).contains(&i64::from(*y)));
            payload.week = match weeks.first() {
                Some(first) => first.trim().parse::<u32>().ok(),
                None => *week,
            };
            let numeric_weeks: Vec<u32> = weeks
                .iter()
                .filter_map(|label| label.trim().parse::<u32>().ok())
                .collect();
            payload.weeks = if numeric_weeks.is_empty() {
                None
            } else {
                Some(numeric_weeks)
            };
        }
        FilterMode::DateRange {
            date_start,
            date_end,
        } => {
            let start: Option<Date> = date_start.as_deref().and_then(parse_date_lenient);
            let end: Option<Date> = date_end.as_deref().and_then(parse_date_lenient);
            let (start, end) = close_date_range(start, end)?;
            payload.date_start = start;
            payload.date_end = end;
        }
    }
    payload.clear_inactive_mode();

    tracing::debug!(
        mode = payload.mode.as_str(),
        venue = payload.venue.as_deref(),
        year = payload.year,
        week = payload.week,
        "built filter payload"
    );

    Ok(payload)
}

/// Builds the payload for one period of a comparison.
///
/// The synthetic selection has only the year, week and venue set; every
/// multi-select is left empty so facets are not applied twice.
///
/// # Arguments
///
/// * `week_label` - The period label (`"2025-W45"`, `"45"`, ...)
/// * `venue` - The venue requested by the comparison
/// * `user` - The access context of the requesting user, if any
/// * `current_year` - Year used when the label carries none
///
/// # Errors
///
/// Returns `ValidationError::InvalidWeek` if the label has no week number.
pub fn create_comparison_filter(
    week_label: &str,
    venue: Option<&str>,
    user: Option<&UserAccessContext>,
    current_year: i32,
) -> Result<FilterPayload, ValidationError> {
    let week: WeekIdentifier =
        WeekIdentifier::parse(week_label, current_year).ok_or(ValidationError::InvalidWeek)?;
    comparison_filter_for(&week, venue, user)
}

/// Builds the payload for an already parsed comparison period.
///
/// # Errors
///
/// Never fails for a year/week selection; the `Result` mirrors
/// [`build_filter_payload`].
pub fn comparison_filter_for(
    week: &WeekIdentifier,
    venue: Option<&str>,
    user: Option<&UserAccessContext>,
) -> Result<FilterPayload, ValidationError> {
    let state: FilterState = FilterState {
        venue: venue.map(str::to_string),
        ..FilterState::year_week(Some(week.year), Some(week.week_number))
    };
    build_filter_payload(&state, user)
}

/// Parses a date bound as entered in the UI.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time part
/// (`2025-03-10T00:00:00Z`).
#[must_use]
pub fn parse_date_lenient(text: &str) -> Option<Date> {
    let text: &str = text.trim();
    let day: &str = text.get(..10)?;
    match text.get(10..11) {
        None | Some("T" | " ") => parse_iso_date(day),
        Some(_) => None,
    }
}

/// Resolves a singular facet from its multi-select list or legacy value.
fn resolve_facet(selection: &[String], single: Option<&str>) -> Option<String> {
    let selected: Vec<&str> = selection
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .take(FACET_MAX_ITEMS)
        .collect();

    match selected.as_slice() {
        [] => normalize_single(single),
        [only] => Some((*only).to_string()),
        many => Some(many.join(",")),
    }
}

/// Trims a single value, dropping blanks and truncating long values.
fn normalize_single(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| truncate_chars(v, FACET_MAX_LENGTH))
}

/// Sanitizes a multi-select list for the array parameters.
fn sanitize_selection(selection: &[String]) -> Option<Vec<String>> {
    let sanitized: Vec<String> = selection
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| truncate_chars(entry, FACET_MAX_LENGTH))
        .take(FACET_MAX_ITEMS)
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}
