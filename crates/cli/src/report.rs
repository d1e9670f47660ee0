// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON report of a comparison.

use serde::Serialize;

use painel_core::{
    Breakdown, BreakdownComparison, ComparisonRow, PeriodTotals, WeekdayComparison,
    build_breakdown_comparison, build_totals_comparison, build_weekday_comparison, paginate,
};

/// Every slide dataset of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Period labels, in selection order.
    pub periods: Vec<String>,
    /// Totals slide rows.
    pub totals: Vec<PeriodTotals>,
    /// Weekday slide rows, Monday first.
    pub weekdays: Vec<WeekdayComparison>,
    /// Pages of sub-venue entries.
    pub sub_venues: Vec<Vec<BreakdownComparison>>,
    /// Pages of origin entries.
    pub origins: Vec<Vec<BreakdownComparison>>,
    /// Pages of shift entries.
    pub shifts: Vec<Vec<BreakdownComparison>>,
}

impl ComparisonReport {
    /// Builds the report, paginating breakdowns by `per_page` entries.
    #[must_use]
    pub fn build(rows: &[ComparisonRow], per_page: usize) -> Self {
        let page = |breakdown: Breakdown| {
            paginate(&build_breakdown_comparison(rows, breakdown), per_page)
        };
        Self {
            periods: rows.iter().map(ComparisonRow::label).collect(),
            totals: build_totals_comparison(rows),
            weekdays: build_weekday_comparison(rows),
            sub_venues: page(Breakdown::SubVenue),
            origins: page(Breakdown::Origin),
            shifts: page(Breakdown::Shift),
        }
    }
}
