// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalization of `dashboard_resumo` responses.

use serde::Serialize;
use serde_json::Value;

use crate::hours::adherence_percent;
use crate::metrics::{
    ADHERENCE, DELIVERED_SECONDS, MetricAliasTable, PLANNED_SECONDS, RIDES_ACCEPTED,
    RIDES_COMPLETED, RIDES_OFFERED, RIDES_REJECTED, default_aliases,
};

/// Aggregate totals of one period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Totals {
    /// Rides offered to drivers.
    pub rides_offered: f64,
    /// Rides accepted.
    pub rides_accepted: f64,
    /// Rides rejected.
    pub rides_rejected: f64,
    /// Rides completed.
    pub rides_completed: f64,
    /// Planned working time, in seconds.
    pub planned_seconds: f64,
    /// Delivered working time, in seconds.
    pub delivered_seconds: f64,
    /// Delivered over planned hours, as a percentage.
    pub adherence: f64,
}

impl Totals {
    /// Reads totals from a response object.
    ///
    /// When the response carries no adherence it is derived from the
    /// planned and delivered seconds.
    #[must_use]
    pub fn from_value(value: &Value, aliases: &MetricAliasTable) -> Self {
        let planned_seconds: f64 = aliases.get_metric_value(value, PLANNED_SECONDS);
        let delivered_seconds: f64 = aliases.get_metric_value(value, DELIVERED_SECONDS);
        Self {
            rides_offered: aliases.get_metric_value(value, RIDES_OFFERED),
            rides_accepted: aliases.get_metric_value(value, RIDES_ACCEPTED),
            rides_rejected: aliases.get_metric_value(value, RIDES_REJECTED),
            rides_completed: aliases.get_metric_value(value, RIDES_COMPLETED),
            planned_seconds,
            delivered_seconds,
            adherence: aliases
                .number(value, ADHERENCE)
                .unwrap_or_else(|| adherence_percent(delivered_seconds, planned_seconds)),
        }
    }
}

/// Option lists used to populate the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Dimensions {
    /// Available years.
    pub years: Vec<String>,
    /// Available week labels.
    pub weeks: Vec<String>,
    /// Available venues.
    pub venues: Vec<String>,
    /// Available sub-venues.
    pub sub_venues: Vec<String>,
    /// Available origins.
    pub origins: Vec<String>,
    /// Available shifts.
    pub shifts: Vec<String>,
}

impl Dimensions {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            years: string_list(value, &["anos", "years"]),
            weeks: string_list(value, &["semanas", "weeks"]),
            venues: string_list(value, &["pracas", "venues"]),
            sub_venues: string_list(value, &["sub_pracas", "sub_venues"]),
            origins: string_list(value, &["origens", "origins"]),
            shifts: string_list(value, &["turnos", "shifts"]),
        }
    }
}

/// One period's dashboard data.
///
/// Breakdown rows are kept as raw JSON objects since their shape depends on
/// the backend version; read them through the alias table and the day
/// resolvers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardSnapshot {
    /// Aggregate totals.
    pub totals: Totals,
    /// Weekly adherence rows.
    pub weekly: Vec<Value>,
    /// Daily adherence rows.
    pub daily: Vec<Value>,
    /// Per shift adherence rows.
    pub by_shift: Vec<Value>,
    /// Per sub-venue adherence rows.
    pub by_sub_venue: Vec<Value>,
    /// Per origin adherence rows.
    pub by_origin: Vec<Value>,
    /// Filter option lists.
    pub dimensions: Dimensions,
}

impl DashboardSnapshot {
    /// Normalizes a `dashboard_resumo` response.
    ///
    /// Missing or malformed sections become zeroed totals or empty lists.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::from_value_with(value, default_aliases())
    }

    /// Normalizes a response using a custom alias table.
    #[must_use]
    pub fn from_value_with(value: &Value, aliases: &MetricAliasTable) -> Self {
        if !value.is_object() {
            tracing::warn!("dashboard response is not an object; using an empty snapshot");
            return Self::default();
        }

        let totals: Totals = ["totais", "totals"]
            .iter()
            .find_map(|key| value.get(*key).filter(|v| v.is_object()))
            .map_or_else(Totals::default, |totals| {
                Totals::from_value(totals, aliases)
            });

        Self {
            totals,
            weekly: row_list(value, &["aderencia_semanal", "semanal", "weekly"]),
            daily: row_list(value, &["aderencia_dia", "dia", "daily"]),
            by_shift: row_list(value, &["aderencia_turno", "turno", "by_shift"]),
            by_sub_venue: row_list(value, &["aderencia_sub_praca", "sub_praca", "by_sub_venue"]),
            by_origin: row_list(value, &["aderencia_origem", "origem", "by_origin"]),
            dimensions: ["dimensoes", "dimensions"]
                .iter()
                .find_map(|key| value.get(*key))
                .map_or_else(Dimensions::default, Dimensions::from_value),
        }
    }
}

fn row_list(value: &Value, keys: &[&str]) -> Vec<Value> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .map(|rows| rows.iter().filter(|row| row.is_object()).cloned().collect())
        .unwrap_or_default()
}

fn string_list(value: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_array))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
