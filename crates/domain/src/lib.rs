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

mod access;
mod error;
mod payload;
mod types;
pub mod validation;
mod week;
pub mod wire;

#[cfg(test)]
mod tests;

pub use access::{can_access_venue, scope_venue};
pub use error::ValidationError;
pub use payload::{
    FilterPayload, build_filter_payload, comparison_filter_for, create_comparison_filter,
    parse_date_lenient,
};
pub use types::{
    FilterMode, FilterModeKind, FilterState, OrganizationScope, Role, UserAccessContext,
};
pub use validation::{ValidatedFilters, validate_filter_payload};
pub use week::{WeekIdentifier, parse_week_string};

/// Returns today's date in UTC.
#[must_use]
pub fn today() -> time::Date {
    time::OffsetDateTime::now_utc().date()
}

/// Returns the current calendar year in UTC.
#[must_use]
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}
