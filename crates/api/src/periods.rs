// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Listing of the periods available for comparison.

use serde_json::Value;
use time::{Date, Duration};

use painel_domain::WeekIdentifier;

use crate::rpc::{CallOptions, DashboardRpc, RpcClient};

/// Keys under which the week list may be wrapped.
const WRAPPER_KEYS: [&str; 3] = ["semanas", "weeks", "data"];

/// Lists the periods with data, most recent first.
///
/// Falls back to `fallback` when the call fails or returns no usable
/// period.
pub async fn list_available_periods<C: RpcClient>(
    rpc: &DashboardRpc<C>,
    current_year: i32,
    fallback: &[WeekIdentifier],
) -> Vec<WeekIdentifier> {
    match rpc.list_weeks(CallOptions::default()).await {
        Ok(response) => {
            let periods: Vec<WeekIdentifier> = parse_period_list(&response, current_year);
            if periods.is_empty() {
                tracing::warn!("week list is empty or malformed; using fallback periods");
                fallback.to_vec()
            } else {
                periods
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to list weeks; using fallback periods");
            fallback.to_vec()
        }
    }
}

/// Reads periods from a `listar_todas_semanas` response.
///
/// Accepts a bare array or an object wrapping one, whose entries are labels,
/// week numbers, or `{ano, semana}` / `{year, week}` objects. Unreadable
/// entries are skipped and duplicates removed.
#[must_use]
pub fn parse_period_list(response: &Value, current_year: i32) -> Vec<WeekIdentifier> {
    let entries: &[Value] = match response {
        Value::Array(entries) => entries,
        Value::Object(fields) => WRAPPER_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_array))
            .or_else(|| fields.values().find_map(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let mut periods: Vec<WeekIdentifier> = entries
        .iter()
        .filter_map(|entry| WeekIdentifier::from_value(entry, current_year))
        .filter(|week| (1..=53).contains(&week.week_number))
        .collect();
    periods.sort_unstable_by(|a, b| b.cmp(a));
    periods.dedup();
    periods
}

/// Returns the `count` ISO weeks ending with the week of `today`, most
/// recent first.
#[must_use]
pub fn recent_weeks(today: Date, count: usize) -> Vec<WeekIdentifier> {
    (0..count)
        .map_while(|offset| {
            let weeks_back: i64 = i64::try_from(offset).ok()?;
            let day: Date = today.checked_sub(Duration::weeks(weeks_back))?;
            let (year, week, _) = day.to_iso_week_date();
            Some(WeekIdentifier::new(year, u32::from(week)))
        })
        .collect()
}
