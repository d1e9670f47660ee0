// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The RPC boundary to the backend.

use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use time::Date;

use painel_core::{DashboardSnapshot, UtrData};
use painel_domain::{FilterPayload, validate_filter_payload};

use crate::error::RpcError;

/// Names of the backend functions this crate calls.
pub mod functions {
    /// Aggregate dashboard metrics for a filter.
    pub const DASHBOARD_SUMMARY: &str = "dashboard_resumo";
    /// Utilization rate for a filter.
    pub const CALCULATE_UTR: &str = "calcular_utr";
    /// Every week with data.
    pub const LIST_WEEKS: &str = "listar_todas_semanas";
    /// Records a user action.
    pub const REGISTER_ACTIVITY: &str = "registrar_atividade";
}

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallOptions {
    /// Overrides the transport's default timeout.
    pub timeout: Option<Duration>,
    /// Validates filter parameters before the call is made.
    pub validate_params: bool,
}

impl CallOptions {
    /// Options that validate filter parameters before calling.
    #[must_use]
    pub const fn validated() -> Self {
        Self {
            timeout: None,
            validate_params: true,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Transport for named backend functions taking and returning JSON.
///
/// Implementations own timeouts and retries.
pub trait RpcClient: Send + Sync {
    /// Calls `function` with `params`.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::FunctionNotFound` when the backend does not expose
    /// the function, and other variants for transport or status failures.
    fn call(
        &self,
        function: &str,
        params: Value,
        options: CallOptions,
    ) -> impl Future<Output = Result<Value, RpcError>> + Send;
}

/// Typed access to the dashboard functions.
#[derive(Debug)]
pub struct DashboardRpc<C> {
    client: Arc<C>,
}

impl<C> Clone for DashboardRpc<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: RpcClient> DashboardRpc<C> {
    #[must_use]
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Fetches and normalizes the dashboard snapshot for a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the call fails.
    pub async fn dashboard_summary(
        &self,
        payload: &FilterPayload,
        options: CallOptions,
    ) -> Result<DashboardSnapshot, RpcError> {
        let response: Value = self
            .call_filtered(functions::DASHBOARD_SUMMARY, payload, options)
            .await?;
        Ok(DashboardSnapshot::from_value(&response))
    }

    /// Fetches the utilization rate for a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the call fails.
    pub async fn calculate_utr(
        &self,
        payload: &FilterPayload,
        options: CallOptions,
    ) -> Result<UtrData, RpcError> {
        let response: Value = self
            .call_filtered(functions::CALCULATE_UTR, payload, options)
            .await?;
        Ok(UtrData::from_value(&response))
    }

    /// Fetches the raw list of weeks with data.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_weeks(&self, options: CallOptions) -> Result<Value, RpcError> {
        self.client
            .call(functions::LIST_WEEKS, json!({}), options)
            .await
    }

    async fn call_filtered(
        &self,
        function: &str,
        payload: &FilterPayload,
        options: CallOptions,
    ) -> Result<Value, RpcError> {
        let params: Value = payload.to_params().map_err(|e| RpcError::Decode {
            function: function.to_string(),
            message: e.to_string(),
        })?;
        if options.validate_params {
            validate_params(&params, painel_domain::today())?;
        }
        tracing::debug!(function, "calling dashboard function");
        self.client.call(function, params, options).await
    }
}

/// Validates filter parameters as the backend expects them.
///
/// # Errors
///
/// Returns `RpcError::InvalidParams` if validation fails.
pub(crate) fn validate_params(params: &Value, today: Date) -> Result<(), RpcError> {
    validate_filter_payload(params, today).map(|_| ()).map_err(|e| {
        tracing::warn!(error = %e, "rejecting call with invalid filter parameters");
        RpcError::InvalidParams(e)
    })
}
