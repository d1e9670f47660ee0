// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use serde_json::Value;

use painel_domain::WeekIdentifier;

use crate::metrics::{MetricAliasTable, UTR, UTR_HOURS, UTR_RIDES, default_aliases};
use crate::snapshot::DashboardSnapshot;

/// Utilization rate of one period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UtrData {
    /// Rides per delivered hour.
    pub utr: f64,
    /// Delivered hours.
    pub hours: f64,
    /// Completed rides.
    pub rides: f64,
}

impl UtrData {
    /// Reads a `calcular_utr` response.
    ///
    /// The figures are read from the `geral` object when present, otherwise
    /// from the top level. Missing figures are zero.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::from_value_with(value, default_aliases())
    }

    /// See [`UtrData::from_value`].
    #[must_use]
    pub fn from_value_with(value: &Value, aliases: &MetricAliasTable) -> Self {
        let source: &Value = value
            .get("geral")
            .filter(|geral| geral.is_object())
            .unwrap_or(value);
        Self {
            utr: aliases.get_metric_value(source, UTR),
            hours: aliases.get_metric_value(source, UTR_HOURS),
            rides: aliases.get_metric_value(source, UTR_RIDES),
        }
    }
}

/// One compared period.
///
/// Rows are kept in selection order so consecutive periods can be diffed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// The compared week.
    pub period: WeekIdentifier,
    /// Normalized dashboard data for the week.
    pub snapshot: DashboardSnapshot,
    /// `None` when the utilization rate could not be fetched.
    pub utr: Option<UtrData>,
}

impl ComparisonRow {
    #[must_use]
    pub const fn new(
        period: WeekIdentifier,
        snapshot: DashboardSnapshot,
        utr: Option<UtrData>,
    ) -> Self {
        Self {
            period,
            snapshot,
            utr,
        }
    }

    /// Returns the period label, e.g. `2025-W10`.
    #[must_use]
    pub fn label(&self) -> String {
        self.period.to_string()
    }
}
