// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Primitive bounds checks shared by the filter validators.

use serde_json::Value;

use crate::error::ValidationError;

/// Validates that a value coerces to a base-10 integer within `[min, max]`.
///
/// Coercion follows the dashboard's lenient integer parsing: numbers are
/// truncated toward zero, strings are read up to the first non-digit after
/// an optional sign (`"45abc"` is 45, `"abc"` is rejected).
///
/// # Errors
///
/// Returns `ValidationError::NotAnInteger` when no integer can be read and
/// `ValidationError::OutOfRange` when the integer is outside the bounds.
pub fn validate_integer(
    value: &Value,
    min: i64,
    max: i64,
    field: &str,
) -> Result<i64, ValidationError> {
    let parsed: Option<i64> = match value {
        Value::Number(n) => n.as_i64().or_else(|| truncate_float(n.as_f64())),
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    };

    let Some(parsed) = parsed else {
        return Err(ValidationError::NotAnInteger {
            field: field.to_string(),
            value: display_raw(value),
        });
    };

    if !(min..=max).contains(&parsed) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: parsed,
            min,
            max,
        });
    }

    Ok(parsed)
}

/// Validates and trims a string value.
///
/// # Errors
///
/// Returns `ValidationError::EmptyValue` if the trimmed value is empty and
/// `allow_empty` is false, or `ValidationError::TooLong` if it has more than
/// `max_length` characters.
pub fn validate_string(
    value: &str,
    max_length: usize,
    field: &str,
    allow_empty: bool,
) -> Result<String, ValidationError> {
    let trimmed: &str = value.trim();

    if trimmed.is_empty() && !allow_empty {
        return Err(ValidationError::EmptyValue {
            field: field.to_string(),
        });
    }

    if trimmed.chars().count() > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
        });
    }

    Ok(trimmed.to_string())
}

/// Reads an optional sign followed by decimal digits from the start of `s`.
///
/// Leading whitespace is skipped and trailing characters are ignored.
/// Returns `None` if no digit follows the sign or the value overflows.
#[must_use]
pub fn parse_leading_integer(s: &str) -> Option<i64> {
    let trimmed: &str = s.trim_start();
    let (negative, rest): (bool, &str) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end: usize = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Truncates a finite float toward zero.
#[allow(clippy::cast_possible_truncation)]
fn truncate_float(value: Option<f64>) -> Option<i64> {
    let value: f64 = value?;
    if !value.is_finite() || value.abs() >= 9.0e18 {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Renders a raw JSON value for an error message.
fn display_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
