// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period comparison.
//!
//! A comparison fetches the dashboard snapshot and the utilization rate of
//! every selected period concurrently and returns one row per period, in
//! selection order.

use futures::future::try_join_all;
use std::sync::{Mutex, PoisonError};

use painel_core::{ComparisonRow, DashboardSnapshot, UtrData};
use painel_domain::{
    FilterPayload, UserAccessContext, WeekIdentifier, comparison_filter_for, parse_week_string,
};

use crate::error::ComparisonError;
use crate::rpc::{CallOptions, DashboardRpc, RpcClient};
use crate::sequence::{RequestSequence, RequestTicket};

/// Minimum number of periods in a comparison.
const MIN_PERIODS: usize = 2;

/// Lifecycle of the comparison data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComparisonState {
    /// Nothing requested yet, or the selection was too small.
    #[default]
    Idle,
    /// A comparison is in flight.
    Loading,
    /// The latest comparison succeeded.
    Success(Vec<ComparisonRow>),
    /// The latest comparison failed, with a user-facing message.
    Error(String),
}

impl ComparisonState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the compared rows, if the latest comparison succeeded.
    #[must_use]
    pub fn rows(&self) -> Option<&[ComparisonRow]> {
        match self {
            Self::Success(rows) => Some(rows),
            _ => None,
        }
    }
}

/// Runs comparisons and tracks the state of the latest one.
#[derive(Debug)]
pub struct ComparisonService<C> {
    rpc: DashboardRpc<C>,
    sequence: RequestSequence,
    state: Mutex<ComparisonState>,
    options: CallOptions,
    current_year: i32,
}

impl<C: RpcClient> ComparisonService<C> {
    /// Creates a service using the current year for labels without one.
    #[must_use]
    pub fn new(rpc: DashboardRpc<C>) -> Self {
        Self {
            rpc,
            sequence: RequestSequence::new(),
            state: Mutex::new(ComparisonState::Idle),
            options: CallOptions::validated(),
            current_year: painel_domain::current_year(),
        }
    }

    /// Sets the year assumed for period labels that carry none.
    #[must_use]
    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.current_year = current_year;
        self
    }

    /// Sets the options used for every call.
    #[must_use]
    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ComparisonState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Compares the selected periods.
    ///
    /// Returns `Ok(None)` when a newer comparison was started while this
    /// one was in flight; its result is discarded and the state is left to
    /// the newer comparison.
    ///
    /// # Arguments
    ///
    /// * `periods` - Period labels in selection order (`"2025-W10"`, ...)
    /// * `venue` - The venue to compare
    /// * `user` - The access context of the requesting user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two periods are selected, a label
    /// cannot be parsed, a filter is invalid, or a snapshot fetch fails.
    /// A failed utilization-rate fetch only blanks that period's rate.
    pub async fn compare(
        &self,
        periods: &[String],
        venue: Option<&str>,
        user: Option<&UserAccessContext>,
    ) -> Result<Option<Vec<ComparisonRow>>, ComparisonError> {
        if periods.len() < MIN_PERIODS {
            self.sequence.invalidate();
            self.set_state(ComparisonState::Idle);
            return Err(ComparisonError::InsufficientPeriods {
                selected: periods.len(),
            });
        }

        let ticket: RequestTicket = self.sequence.begin();
        self.set_state(ComparisonState::Loading);
        tracing::info!(
            periods = periods.len(),
            request = ticket.id(),
            "starting period comparison"
        );

        let result: Result<Vec<ComparisonRow>, ComparisonError> =
            self.fetch_rows(periods, venue, user).await;

        if !self.sequence.is_current(ticket) {
            tracing::debug!(
                request = ticket.id(),
                "discarding superseded comparison result"
            );
            return Ok(None);
        }

        match result {
            Ok(rows) => {
                self.set_state(ComparisonState::Success(rows.clone()));
                Ok(Some(rows))
            }
            Err(e) => {
                tracing::warn!(error = %e, "period comparison failed");
                self.set_state(ComparisonState::Error(e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch_rows(
        &self,
        periods: &[String],
        venue: Option<&str>,
        user: Option<&UserAccessContext>,
    ) -> Result<Vec<ComparisonRow>, ComparisonError> {
        let mut requests: Vec<(WeekIdentifier, FilterPayload)> = Vec::with_capacity(periods.len());
        for label in periods {
            let week: WeekIdentifier = parse_week_string(label, self.current_year).ok_or_else(
                || ComparisonError::InvalidPeriod {
                    label: label.clone(),
                },
            )?;
            let payload: FilterPayload = comparison_filter_for(&week, venue, user)?;
            requests.push((week, payload));
        }

        try_join_all(
            requests
                .iter()
                .map(|(week, payload)| self.fetch_period(*week, payload)),
        )
        .await
    }

    async fn fetch_period(
        &self,
        week: WeekIdentifier,
        payload: &FilterPayload,
    ) -> Result<ComparisonRow, ComparisonError> {
        let (snapshot, utr) = tokio::join!(
            self.rpc.dashboard_summary(payload, self.options),
            self.rpc.calculate_utr(payload, self.options),
        );

        let snapshot: DashboardSnapshot = snapshot.map_err(|source| ComparisonError::Snapshot {
            period: week.to_string(),
            source,
        })?;

        let utr: Option<UtrData> = match utr {
            Ok(utr) => Some(utr),
            Err(e) => {
                tracing::warn!(
                    period = %week,
                    error = %e,
                    "utilization rate unavailable for period"
                );
                None
            }
        };

        Ok(ComparisonRow::new(week, snapshot, utr))
    }

    fn set_state(&self, state: ComparisonState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
