// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tolerant metric lookup.
//!
//! The backend renamed several response fields over time. Each canonical
//! metric key maps to an ordered list of known aliases; lookups try the
//! canonical key first and then each alias in order.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Offered rides.
pub const RIDES_OFFERED: &str = "corridas_ofertadas";
/// Accepted rides.
pub const RIDES_ACCEPTED: &str = "corridas_aceitas";
/// Rejected rides.
pub const RIDES_REJECTED: &str = "corridas_rejeitadas";
/// Completed rides.
pub const RIDES_COMPLETED: &str = "corridas_completadas";
/// Adherence percentage.
pub const ADHERENCE: &str = "aderencia_percentual";
/// Planned seconds.
pub const PLANNED_SECONDS: &str = "segundos_planejados";
/// Delivered seconds.
pub const DELIVERED_SECONDS: &str = "segundos_realizados";
/// Planned hours, as a duration value.
pub const PLANNED_HOURS: &str = "horas_a_entregar";
/// Delivered hours, as a duration value.
pub const DELIVERED_HOURS: &str = "horas_entregues";
/// Utilization rate.
pub const UTR: &str = "utr";
/// Hours used in the utilization rate.
pub const UTR_HOURS: &str = "tempo_horas";
/// Rides used in the utilization rate.
pub const UTR_RIDES: &str = "corridas";

const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    (
        RIDES_OFFERED,
        &["ofertadas", "total_ofertadas", "corridas_ofertadas_total"],
    ),
    (RIDES_ACCEPTED, &["aceitas", "total_aceitas"]),
    (RIDES_REJECTED, &["rejeitadas", "total_rejeitadas"]),
    (
        RIDES_COMPLETED,
        &["completadas", "total_completadas", "corridas_concluidas"],
    ),
    (ADHERENCE, &["aderencia", "percentual_aderencia"]),
    (
        PLANNED_SECONDS,
        &["segundos_planejados_total", "tempo_planejado_segundos"],
    ),
    (
        DELIVERED_SECONDS,
        &[
            "segundos_realizados_total",
            "tempo_realizado_segundos",
            "segundos_entregues",
        ],
    ),
    (PLANNED_HOURS, &["horas_planejadas", "tempo_planejado"]),
    (DELIVERED_HOURS, &["horas_realizadas", "tempo_entregue"]),
    (UTR, &["taxa_utilizacao", "utr_geral"]),
    (UTR_HOURS, &["horas", "total_horas"]),
    (UTR_RIDES, &["total_corridas", "corridas_completadas"]),
];

static DEFAULT_TABLE: LazyLock<MetricAliasTable> = LazyLock::new(MetricAliasTable::new);

/// A duration metric as found in a response.
///
/// Durations arrive either as `"HH:MM:SS"` text or as a number of seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Text as received, e.g. `"12:30:00"`.
    Text(String),
    /// A numeric duration.
    Number(f64),
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::Text(String::from("0"))
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Canonical metric key to ordered aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricAliasTable {
    aliases: BTreeMap<String, Vec<String>>,
}

impl MetricAliasTable {
    /// Creates the table with every alias known to the backend.
    #[must_use]
    pub fn new() -> Self {
        let aliases: BTreeMap<String, Vec<String>> = DEFAULT_ALIASES
            .iter()
            .map(|(key, aliases)| {
                (
                    (*key).to_string(),
                    aliases.iter().map(|a| (*a).to_string()).collect(),
                )
            })
            .collect();
        Self { aliases }
    }

    /// Creates a table with no aliases.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Appends an alias for `canonical`, after the existing ones.
    #[must_use]
    pub fn with_alias(mut self, canonical: &str, alias: &str) -> Self {
        let entry: &mut Vec<String> = self.aliases.entry(canonical.to_string()).or_default();
        if !entry.iter().any(|existing| existing == alias) {
            entry.push(alias.to_string());
        }
        self
    }

    /// Returns the aliases registered for `canonical`.
    #[must_use]
    pub fn aliases(&self, canonical: &str) -> &[String] {
        self.aliases
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the keys to try for `canonical`, in order.
    pub fn candidates<'a>(&'a self, canonical: &'a str) -> impl Iterator<Item = &'a str> {
        std::iter::once(canonical).chain(self.aliases(canonical).iter().map(String::as_str))
    }

    /// Returns the first present, non-null field for `canonical`.
    #[must_use]
    pub fn lookup<'v>(&self, obj: &'v Value, canonical: &str) -> Option<&'v Value> {
        self.candidates(canonical)
            .find_map(|key| obj.get(key).filter(|value| !value.is_null()))
    }

    /// Reads a numeric metric, or `None` when no candidate field is numeric.
    #[must_use]
    pub fn number(&self, obj: &Value, canonical: &str) -> Option<f64> {
        self.candidates(canonical)
            .filter_map(|key| obj.get(key))
            .find_map(as_finite_number)
    }

    /// Reads a numeric metric, defaulting to `0.0`.
    #[must_use]
    pub fn get_metric_value(&self, obj: &Value, canonical: &str) -> f64 {
        self.number(obj, canonical).unwrap_or(0.0)
    }

    /// Reads a duration metric, defaulting to `"0"`.
    #[must_use]
    pub fn get_time_metric(&self, obj: &Value, canonical: &str) -> TimeValue {
        match self.lookup(obj, canonical) {
            Some(Value::String(text)) => TimeValue::Text(text.clone()),
            Some(value) => as_finite_number(value).map_or_else(TimeValue::default, TimeValue::Number),
            None => TimeValue::default(),
        }
    }
}

impl Default for MetricAliasTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the table of aliases known to the backend.
#[must_use]
pub fn default_aliases() -> &'static MetricAliasTable {
    &DEFAULT_TABLE
}

/// Reads a numeric metric through the default alias table.
///
/// Returns `0.0` when no field is present, never `NaN`.
#[must_use]
pub fn get_metric_value(obj: &Value, canonical: &str) -> f64 {
    DEFAULT_TABLE.get_metric_value(obj, canonical)
}

/// Reads a duration metric through the default alias table.
#[must_use]
pub fn get_time_metric(obj: &Value, canonical: &str) -> TimeValue {
    DEFAULT_TABLE.get_time_metric(obj, canonical)
}

/// Reads a finite number from a JSON number or numeric string.
#[must_use]
pub fn as_finite_number(value: &Value) -> Option<f64> {
    let number: f64 = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
