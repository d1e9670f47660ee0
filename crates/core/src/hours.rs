// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::metrics::{MetricAliasTable, default_aliases};
use crate::snapshot::DashboardSnapshot;

/// Formats a number of hours as `HH:MM:SS`.
///
/// Negative and non-finite inputs format as `00:00:00`. Hours are not
/// wrapped at 24.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_hours_hms(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return String::from("00:00:00");
    }
    let total_seconds: u64 = (hours * 3600.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

/// Returns delivered over planned as a percentage, or `0.0` with nothing planned.
#[must_use]
pub fn adherence_percent(delivered: f64, planned: f64) -> f64 {
    if planned > 0.0 && delivered.is_finite() {
        delivered / planned * 100.0
    } else {
        0.0
    }
}

/// Returns the weekly total of a seconds metric as `HH:MM:SS`.
///
/// Prefers the pre-aggregated weekly rows, falls back to the sum over the
/// daily rows, and finally to `00:00:00`.
#[must_use]
pub fn get_weekly_hours(snapshot: &DashboardSnapshot, metric: &str) -> String {
    get_weekly_hours_with(snapshot, metric, default_aliases())
}

/// See [`get_weekly_hours`].
#[must_use]
pub fn get_weekly_hours_with(
    snapshot: &DashboardSnapshot,
    metric: &str,
    aliases: &MetricAliasTable,
) -> String {
    let seconds: Option<f64> = sum_rows(&snapshot.weekly, metric, aliases)
        .or_else(|| sum_rows(&snapshot.daily, metric, aliases));
    seconds.map_or_else(|| String::from("00:00:00"), |s| format_hours_hms(s / 3600.0))
}

fn sum_rows(rows: &[serde_json::Value], metric: &str, aliases: &MetricAliasTable) -> Option<f64> {
    rows.iter()
        .filter_map(|row| aliases.number(row, metric))
        .fold(None, |acc, value| Some(acc.unwrap_or(0.0) + value))
}
