// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Venue, sub-venue, origin and shift facet validation.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::common::validate_integer;
use super::field;
use crate::error::ValidationError;
use crate::wire;

/// Maximum number of entries in any facet list.
pub const FACET_MAX_ITEMS: usize = 50;

/// Maximum length of a facet entry, in characters.
pub const FACET_MAX_LENGTH: usize = 100;

/// Inclusive bounds for the row limit.
pub const LIMIT_RANGE: (i64, i64) = (1, 100);

#[allow(clippy::expect_used)]
static FACET_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s\-_.ÁÀÂÃÉÊÍÓÔÕÚÜÇáàâãéêíóôõúüç]+$")
        .expect("facet character set pattern is valid")
});

/// Validated venue facets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationFilters {
    /// Venue, comma-joined when several were given.
    pub venue: Option<String>,
    /// Sub-venue, comma-joined when several were given.
    pub sub_venue: Option<String>,
    /// Sanitized sub-venue multi-selection.
    pub sub_venues: Option<Vec<String>>,
}

/// Validated origin, shift and limit fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuxiliaryFilters {
    /// Origin, comma-joined when several were given.
    pub origin: Option<String>,
    /// Shift, comma-joined when several were given.
    pub shift: Option<String>,
    /// Sanitized origin multi-selection.
    pub origins: Option<Vec<String>>,
    /// Sanitized shift multi-selection.
    pub shifts: Option<Vec<String>>,
    /// Row limit.
    pub limit: Option<u32>,
}

/// Validates the venue and sub-venue fields of a payload.
///
/// # Errors
///
/// Returns an error if a singular facet has more than 50 entries, or an
/// entry that is empty, longer than 100 characters, or contains characters
/// outside the allow-list.
pub fn validate_location_filters(payload: &Value) -> Result<LocationFilters, ValidationError> {
    Ok(LocationFilters {
        venue: field(payload, wire::VENUE)
            .map(|raw| validate_facet(raw, "Praça", "praças"))
            .transpose()?
            .flatten(),
        sub_venue: field(payload, wire::SUB_VENUE)
            .map(|raw| validate_facet(raw, "Sub-praça", "sub-praças"))
            .transpose()?
            .flatten(),
        sub_venues: field(payload, wire::SUB_VENUES).and_then(sanitize_multi_select),
    })
}

/// Validates the origin, shift and limit fields of a payload.
///
/// # Errors
///
/// Returns an error under the same facet rules as
/// [`validate_location_filters`], or if the limit is not an integer in
/// 1..=100.
pub fn validate_auxiliary_filters(payload: &Value) -> Result<AuxiliaryFilters, ValidationError> {
    let limit: Option<u32> = field(payload, wire::LIMIT)
        .map(|raw| validate_integer(raw, LIMIT_RANGE.0, LIMIT_RANGE.1, "Limite"))
        .transpose()?
        .and_then(|limit| u32::try_from(limit).ok());

    Ok(AuxiliaryFilters {
        origin: field(payload, wire::ORIGIN)
            .map(|raw| validate_facet(raw, "Origem", "origens"))
            .transpose()?
            .flatten(),
        shift: field(payload, wire::SHIFT)
            .map(|raw| validate_facet(raw, "Turno", "turnos"))
            .transpose()?
            .flatten(),
        origins: field(payload, wire::ORIGINS).and_then(sanitize_multi_select),
        shifts: field(payload, wire::SHIFTS).and_then(sanitize_multi_select),
        limit,
    })
}

/// Validates a singular facet given as a comma-separated string or an array.
///
/// A one-element list collapses to the bare value; longer lists are
/// comma-joined. Returns `Ok(None)` when no non-empty entry was given.
///
/// # Errors
///
/// Returns an error if the list has more than 50 entries or any entry fails
/// the length or character-set checks.
pub fn validate_facet(
    raw: &Value,
    field_name: &str,
    plural_label: &str,
) -> Result<Option<String>, ValidationError> {
    let entries: Vec<String> = match raw {
        Value::String(s) => split_comma_list(s),
        Value::Array(items) => {
            let mut entries: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                let Some(text) = scalar_text(item) else {
                    return Err(ValidationError::UnexpectedType {
                        field: field_name.to_string(),
                    });
                };
                let text: &str = text.trim();
                if !text.is_empty() {
                    entries.push(text.to_string());
                }
            }
            entries
        }
        _ => {
            return Err(ValidationError::UnexpectedType {
                field: field_name.to_string(),
            });
        }
    };

    if entries.len() > FACET_MAX_ITEMS {
        return Err(ValidationError::TooManyItems {
            label: plural_label.to_string(),
            max: FACET_MAX_ITEMS,
        });
    }

    for entry in &entries {
        validate_facet_entry(entry, field_name)?;
    }

    Ok(match entries.len() {
        0 => None,
        1 => entries.into_iter().next(),
        _ => Some(entries.join(",")),
    })
}

/// Checks a single facet entry against the length and character rules.
///
/// # Errors
///
/// Returns `ValidationError::InvalidItemLength` or
/// `ValidationError::InvalidCharacters`.
pub fn validate_facet_entry(entry: &str, field_name: &str) -> Result<(), ValidationError> {
    let length: usize = entry.chars().count();
    if length == 0 || length > FACET_MAX_LENGTH {
        return Err(ValidationError::InvalidItemLength {
            field: field_name.to_string(),
            max_length: FACET_MAX_LENGTH,
        });
    }
    if !FACET_CHARSET.is_match(entry) {
        return Err(ValidationError::InvalidCharacters {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Sanitizes a multi-select facet.
///
/// Multi-select values come from option lists the backend produced, so they
/// are not checked against the character set. Entries are trimmed, empty
/// ones dropped, each truncated to 100 characters and the list capped at 50.
/// Returns `None` when nothing remains.
#[must_use]
pub fn sanitize_multi_select(raw: &Value) -> Option<Vec<String>> {
    let entries: Vec<String> = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .map(|text| text.trim().to_string())
            .collect(),
        Value::String(s) => split_comma_list(s),
        _ => return None,
    };

    let sanitized: Vec<String> = entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(|entry| truncate_chars(&entry, FACET_MAX_LENGTH))
        .take(FACET_MAX_ITEMS)
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Truncates a string to at most `max` characters.
#[must_use]
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
