// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Presentation datasets built from compared periods.
//!
//! Every builder walks the periods in selection order and diffs each period
//! against the one before it.

use serde::Serialize;
use serde_json::Value;

use crate::comparison::ComparisonRow;
use crate::day::{WEEK_ORDER, find_weekday_data, portuguese_name};
use crate::hours::{adherence_percent, format_hours_hms, get_weekly_hours};
use crate::metrics::{ADHERENCE, DELIVERED_SECONDS, PLANNED_SECONDS, default_aliases};

/// Placeholder shown when a change has no base to compare against.
pub const NO_CHANGE: &str = "—";

/// Totals of one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotals {
    /// Period label.
    pub period: String,
    /// Rides offered.
    pub rides_offered: f64,
    /// Rides completed.
    pub rides_completed: f64,
    /// Change in completed rides against the previous period.
    pub rides_completed_change: String,
    /// Adherence percentage.
    pub adherence: f64,
    /// Change in adherence against the previous period.
    pub adherence_change: String,
    /// Planned hours as `HH:MM:SS`.
    pub planned_hours: String,
    /// Delivered hours as `HH:MM:SS`.
    pub delivered_hours: String,
    /// Utilization rate, when it could be fetched.
    pub utr: Option<f64>,
    /// Change in utilization rate against the previous period.
    pub utr_change: String,
}

/// One weekday across every period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayComparison {
    /// Portuguese weekday name.
    pub day: &'static str,
    /// One cell per period, in selection order.
    pub periods: Vec<PeriodCell>,
}

/// One breakdown entry (a sub-venue, origin or shift) across every period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownComparison {
    /// Entry name as reported by the backend.
    pub label: String,
    /// One cell per period, in selection order.
    pub periods: Vec<PeriodCell>,
}

/// Adherence of one period within a weekday or breakdown comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCell {
    /// Period label.
    pub period: String,
    /// `None` when the period has no row for this entry.
    pub adherence: Option<f64>,
    /// Delivered hours as `HH:MM:SS`.
    pub delivered_hours: String,
    /// Change in adherence against the previous period.
    pub change: String,
}

/// Breakdown dimensions of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    /// Per sub-venue rows (`aderencia_sub_praca`).
    SubVenue,
    /// Per origin rows (`aderencia_origem`).
    Origin,
    /// Per shift rows (`aderencia_turno`).
    Shift,
}

impl Breakdown {
    /// Label fields, in lookup order.
    const fn label_keys(self) -> &'static [&'static str] {
        match self {
            Self::SubVenue => &["sub_praca", "sub_venue"],
            Self::Origin => &["origem", "origin"],
            Self::Shift => &["turno", "periodo", "shift"],
        }
    }

    fn rows(self, row: &ComparisonRow) -> &[Value] {
        match self {
            Self::SubVenue => &row.snapshot.by_sub_venue,
            Self::Origin => &row.snapshot.by_origin,
            Self::Shift => &row.snapshot.by_shift,
        }
    }

    fn label_of(self, row: &Value) -> Option<String> {
        self.label_keys()
            .iter()
            .find_map(|key| row.get(*key))
            .and_then(|label| match label {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Relative change from `previous` to `current`, in percent.
///
/// Returns `None` when there is no meaningful base.
#[must_use]
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Formats a change as `+12.5%`, `-3.0%` or `0.0%`, and a missing
/// change as `—`.
#[must_use]
pub fn format_signed_percent(change: Option<f64>) -> String {
    let Some(change) = change.filter(|c| c.is_finite()) else {
        return String::from(NO_CHANGE);
    };
    let rounded: f64 = (change * 10.0).round() / 10.0;
    if rounded > 0.0 {
        format!("+{rounded:.1}%")
    } else if rounded < 0.0 {
        format!("{rounded:.1}%")
    } else {
        String::from("0.0%")
    }
}

/// Splits `items` into pages of at most `per_page` entries.
///
/// A `per_page` of zero is treated as one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], per_page: usize) -> Vec<Vec<T>> {
    items.chunks(per_page.max(1)).map(<[T]>::to_vec).collect()
}

/// Change of `current` against the previous period's value.
fn change_against(previous: Option<Option<f64>>, current: Option<f64>) -> String {
    match (previous.flatten(), current) {
        (Some(prev), Some(curr)) => format_signed_percent(percent_change(prev, curr)),
        _ => String::from(NO_CHANGE),
    }
}

/// Builds the totals comparison (rides, adherence, hours and UTR).
#[must_use]
pub fn build_totals_comparison(rows: &[ComparisonRow]) -> Vec<PeriodTotals> {
    let mut result: Vec<PeriodTotals> = Vec::with_capacity(rows.len());
    let mut previous: Option<&ComparisonRow> = None;

    for row in rows {
        let totals = &row.snapshot.totals;
        let prev_totals = previous.map(|p| &p.snapshot.totals);
        let utr: Option<f64> = row.utr.as_ref().map(|u| u.utr);

        result.push(PeriodTotals {
            period: row.label(),
            rides_offered: totals.rides_offered,
            rides_completed: totals.rides_completed,
            rides_completed_change: change_against(
                prev_totals.map(|t| Some(t.rides_completed)),
                Some(totals.rides_completed),
            ),
            adherence: totals.adherence,
            adherence_change: change_against(
                prev_totals.map(|t| Some(t.adherence)),
                Some(totals.adherence),
            ),
            planned_hours: weekly_or_total_hours(row, PLANNED_SECONDS, totals.planned_seconds),
            delivered_hours: weekly_or_total_hours(
                row,
                DELIVERED_SECONDS,
                totals.delivered_seconds,
            ),
            utr,
            utr_change: change_against(
                previous.map(|p| p.utr.as_ref().map(|u| u.utr)),
                utr,
            ),
        });
        previous = Some(row);
    }

    result
}

fn weekly_or_total_hours(row: &ComparisonRow, metric: &str, total_seconds: f64) -> String {
    if total_seconds > 0.0 {
        format_hours_hms(total_seconds / 3600.0)
    } else {
        get_weekly_hours(&row.snapshot, metric)
    }
}

/// Builds the per-weekday adherence comparison, Monday first.
#[must_use]
pub fn build_weekday_comparison(rows: &[ComparisonRow]) -> Vec<WeekdayComparison> {
    WEEK_ORDER
        .iter()
        .map(|day| WeekdayComparison {
            day: portuguese_name(*day),
            periods: cells(rows, |row| {
                find_weekday_data(*day, &row.snapshot.daily)
            }),
        })
        .collect()
}

/// Builds the comparison for one breakdown dimension.
///
/// Entries appear in the order they are first seen across the periods.
#[must_use]
pub fn build_breakdown_comparison(
    rows: &[ComparisonRow],
    breakdown: Breakdown,
) -> Vec<BreakdownComparison> {
    let mut labels: Vec<String> = Vec::new();
    for row in rows {
        for entry in breakdown.rows(row) {
            if let Some(label) = breakdown.label_of(entry) {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let periods: Vec<PeriodCell> = cells(rows, |row| {
                breakdown
                    .rows(row)
                    .iter()
                    .find(|entry| breakdown.label_of(entry).as_deref() == Some(label.as_str()))
            });
            BreakdownComparison { label, periods }
        })
        .collect()
}

/// Builds one cell per period from the row picked by `select`.
fn cells<'a, F>(rows: &'a [ComparisonRow], select: F) -> Vec<PeriodCell>
where
    F: Fn(&'a ComparisonRow) -> Option<&'a Value>,
{
    let mut result: Vec<PeriodCell> = Vec::with_capacity(rows.len());
    let mut previous: Option<Option<f64>> = None;

    for row in rows {
        let entry: Option<&Value> = select(row);
        let adherence: Option<f64> = entry.map(row_adherence);
        let delivered_hours: String = entry
            .and_then(|e| default_aliases().number(e, DELIVERED_SECONDS))
            .map_or_else(|| String::from("00:00:00"), |s| format_hours_hms(s / 3600.0));

        result.push(PeriodCell {
            period: row.label(),
            adherence,
            delivered_hours,
            change: change_against(previous, adherence),
        });
        previous = Some(adherence);
    }

    result
}

/// Adherence of a breakdown row, derived from its seconds when absent.
fn row_adherence(row: &Value) -> f64 {
    let aliases = default_aliases();
    aliases.number(row, ADHERENCE).unwrap_or_else(|| {
        adherence_percent(
            aliases.get_metric_value(row, DELIVERED_SECONDS),
            aliases.get_metric_value(row, PLANNED_SECONDS),
        )
    })
}
