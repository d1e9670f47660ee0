// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use painel_domain::{Role, UserAccessContext};

use crate::{CallOptions, DashboardRpc, RpcClient, RpcError};

type Handler = Box<dyn Fn(&Value) -> (Duration, Result<Value, RpcError>) + Send + Sync>;

/// In-memory backend with per-function handlers.
///
/// Functions without a handler answer `FunctionNotFound`.
#[derive(Default)]
pub struct MockRpcClient {
    handlers: HashMap<String, Handler>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, function: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> (Duration, Result<Value, RpcError>) + Send + Sync + 'static,
    {
        self.handlers.insert(function.to_string(), Box::new(handler));
        self
    }

    pub fn respond(self, function: &str, response: Value) -> Self {
        self.on(function, move |_| (Duration::ZERO, Ok(response.clone())))
    }

    pub fn fail(self, function: &str, error: RpcError) -> Self {
        self.on(function, move |_| (Duration::ZERO, Err(error.clone())))
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, function: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(name, _)| name == function)
            .count()
    }
}

impl RpcClient for MockRpcClient {
    async fn call(
        &self,
        function: &str,
        params: Value,
        _options: CallOptions,
    ) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((function.to_string(), params.clone()));

        let (delay, result) = self.handlers.get(function).map_or_else(
            || {
                (
                    Duration::ZERO,
                    Err(RpcError::FunctionNotFound {
                        function: function.to_string(),
                    }),
                )
            },
            |handler| handler(&params),
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

pub fn create_test_rpc(client: MockRpcClient) -> (Arc<MockRpcClient>, DashboardRpc<MockRpcClient>) {
    let client: Arc<MockRpcClient> = Arc::new(client);
    (Arc::clone(&client), DashboardRpc::new(client))
}

/// A `dashboard_resumo` response whose completed rides equal the week number.
pub fn create_test_summary(params: &Value) -> Value {
    let week: u64 = params["p_semana"].as_u64().unwrap_or(0);
    json!({
        "totais": {
            "corridas_completadas": week,
            "segundos_planejados": 36000,
            "segundos_realizados": 18000
        },
        "aderencia_dia": [{ "dia_da_semana": "Segunda", "aderencia_percentual": 50.0 }]
    })
}

pub fn create_test_utr(params: &Value) -> Value {
    let week: f64 = params["p_semana"].as_f64().unwrap_or(0.0);
    json!({ "geral": { "utr": week / 10.0, "tempo_horas": 10, "corridas": 20 } })
}

pub fn create_single_venue_user(venue: &str) -> UserAccessContext {
    UserAccessContext::new(
        false,
        Role::User,
        vec![String::from(venue)],
        Some(String::from("org-42")),
    )
}

pub fn labels(periods: &[&str]) -> Vec<String> {
    periods.iter().map(|p| String::from(*p)).collect()
}
