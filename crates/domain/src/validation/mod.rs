// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validation of raw filter payloads before they reach the backend.

mod common;
mod date;
mod location;

use serde_json::Value;
use time::Date;

pub use common::{parse_leading_integer, validate_integer, validate_string};
pub use date::{
    DateFilters, MIN_DATE, WEEK_RANGE, YEAR_RANGE, close_date_range, parse_iso_date,
    validate_date, validate_date_filters,
};
pub use location::{
    AuxiliaryFilters, FACET_MAX_ITEMS, FACET_MAX_LENGTH, LIMIT_RANGE, LocationFilters,
    sanitize_multi_select, truncate_chars, validate_auxiliary_filters, validate_facet,
    validate_facet_entry, validate_location_filters,
};

use crate::error::ValidationError;
use crate::payload::FilterPayload;
use crate::types::{FilterModeKind, OrganizationScope};
use crate::wire;

/// Maximum length of an organization identifier.
const ORGANIZATION_ID_MAX_LENGTH: usize = 100;

/// A payload that passed validation, together with its auxiliary limit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidatedFilters {
    /// The normalized payload.
    pub payload: FilterPayload,
    /// Optional row limit.
    pub limit: Option<u32>,
}

/// Validates a raw payload object and normalizes it.
///
/// The date, location and auxiliary validators run in turn; the first
/// failure is returned. The filter mode is read from `p_filtro_modo` when
/// present, otherwise inferred from the presence of date bounds. Fields of
/// the inactive mode are cleared.
///
/// # Arguments
///
/// * `payload` - The raw payload object, keyed by wire parameter names
/// * `today` - The current date
///
/// # Errors
///
/// Returns the first `ValidationError` raised by any validator.
pub fn validate_filter_payload(
    payload: &Value,
    today: Date,
) -> Result<ValidatedFilters, ValidationError> {
    let dates: DateFilters = validate_date_filters(payload, today)?;
    let location: LocationFilters = validate_location_filters(payload)?;
    let auxiliary: AuxiliaryFilters = validate_auxiliary_filters(payload)?;
    let weeks: Option<Vec<u32>> = field(payload, wire::WEEKS)
        .map(validate_week_list)
        .transpose()?
        .flatten();

    let mode: FilterModeKind = match field(payload, wire::FILTER_MODE) {
        Some(Value::String(raw)) => raw.parse::<FilterModeKind>().map_err(|_| {
            ValidationError::UnexpectedType {
                field: String::from("Modo de filtro"),
            }
        })?,
        Some(_) => {
            return Err(ValidationError::UnexpectedType {
                field: String::from("Modo de filtro"),
            });
        }
        None if dates.date_start.is_some() => FilterModeKind::DateRange,
        None => FilterModeKind::YearWeek,
    };

    let organization: OrganizationScope = match field(payload, wire::ORGANIZATION_ID) {
        Some(Value::String(raw)) => {
            let id: String =
                validate_string(raw, ORGANIZATION_ID_MAX_LENGTH, "Organização", true)?;
            if id.is_empty() {
                OrganizationScope::All
            } else {
                OrganizationScope::Organization(id)
            }
        }
        Some(_) => {
            return Err(ValidationError::UnexpectedType {
                field: String::from("Organização"),
            });
        }
        None => OrganizationScope::All,
    };

    let mut normalized: FilterPayload = FilterPayload {
        year: dates.year,
        week: dates.week,
        weeks,
        venue: location.venue,
        sub_venue: location.sub_venue,
        origin: auxiliary.origin,
        shift: auxiliary.shift,
        sub_venues: location.sub_venues,
        origins: auxiliary.origins,
        shifts: auxiliary.shifts,
        mode,
        date_start: dates.date_start,
        date_end: dates.date_end,
        organization,
    };
    normalized.clear_inactive_mode();

    Ok(ValidatedFilters {
        payload: normalized,
        limit: auxiliary.limit,
    })
}

/// Validates a list of ISO week numbers.
fn validate_week_list(raw: &Value) -> Result<Option<Vec<u32>>, ValidationError> {
    let Value::Array(items) = raw else {
        return Err(ValidationError::UnexpectedType {
            field: String::from("Semanas"),
        });
    };

    let mut weeks: Vec<u32> = Vec::with_capacity(items.len());
    for item in items {
        let week: i64 = validate_integer(item, WEEK_RANGE.0, WEEK_RANGE.1, "Semana")
            .map_err(|_| ValidationError::InvalidWeek)?;
        if let Ok(week) = u32::try_from(week) {
            weeks.push(week);
        }
    }

    Ok(if weeks.is_empty() { None } else { Some(weeks) })
}

/// Looks up a payload field, treating null and blank strings as absent.
fn field<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    match payload.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}
