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

mod comparison;
pub mod day;
mod hours;
pub mod metrics;
mod slides;
mod snapshot;

#[cfg(test)]
mod tests;

pub use comparison::{ComparisonRow, UtrData};
pub use day::{find_day_data, find_weekday_data};
pub use hours::{adherence_percent, format_hours_hms, get_weekly_hours, get_weekly_hours_with};
pub use metrics::{MetricAliasTable, TimeValue, get_metric_value, get_time_metric};
pub use slides::{
    Breakdown, BreakdownComparison, NO_CHANGE, PeriodCell, PeriodTotals, WeekdayComparison,
    build_breakdown_comparison, build_totals_comparison, build_weekday_comparison,
    format_signed_percent, paginate, percent_change,
};
pub use snapshot::{DashboardSnapshot, Dimensions, Totals};
