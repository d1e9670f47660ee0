// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP transport for the backend's RPC endpoint.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::error::RpcError;
use crate::rpc::{CallOptions, RpcClient};

/// Error code the backend reports for a missing function.
const FUNCTION_NOT_FOUND_CODE: &str = "PGRST202";

/// Connection settings for [`HttpRpcClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRpcConfig {
    /// Project URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Public API key.
    pub api_key: String,
    /// The user's access token. The API key is sent when absent.
    pub access_token: Option<String>,
    /// Timeout applied to calls without their own.
    pub timeout: Duration,
}

/// Posts JSON parameters to `{base_url}/rest/v1/rpc/{function}`.
#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    client: Client,
    config: HttpRpcConfig,
}

impl HttpRpcClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns `RpcError::Transport` if the HTTP client cannot be built.
    pub fn new(config: HttpRpcConfig) -> Result<Self, RpcError> {
        let client: Client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Returns the endpoint URL of `function`.
    #[must_use]
    pub fn endpoint(&self, function: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{function}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn post(
        &self,
        function: &str,
        params: Value,
        options: CallOptions,
    ) -> Result<Value, RpcError> {
        let token: &str = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);

        let response = self
            .client
            .post(self.endpoint(function))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .timeout(options.timeout.unwrap_or(self.config.timeout))
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcError::Timeout {
                        function: function.to_string(),
                    }
                } else {
                    RpcError::Transport(e.to_string())
                }
            })?;

        let status: StatusCode = response.status();
        let body: String = response
            .text()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(function, status.as_u16(), &body));
        }
        parse_body(function, &body)
    }
}

impl RpcClient for HttpRpcClient {
    async fn call(
        &self,
        function: &str,
        params: Value,
        options: CallOptions,
    ) -> Result<Value, RpcError> {
        self.post(function, params, options).await
    }
}

/// Maps a failed response to an error.
///
/// A 404 status or the backend's missing-function code means the function
/// does not exist.
pub(crate) fn classify_failure(function: &str, status: u16, body: &str) -> RpcError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let code: Option<&str> = parsed
        .as_ref()
        .and_then(|v| v.get("code"))
        .and_then(Value::as_str);

    if status == StatusCode::NOT_FOUND.as_u16() || code == Some(FUNCTION_NOT_FOUND_CODE) {
        return RpcError::FunctionNotFound {
            function: function.to_string(),
        };
    }

    let message: String = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map_or_else(|| body.trim().to_string(), str::to_string);

    RpcError::Status {
        function: function.to_string(),
        status,
        message,
    }
}

/// Parses a successful body. Functions returning `void` answer with an
/// empty body.
pub(crate) fn parse_body(function: &str, body: &str) -> Result<Value, RpcError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| RpcError::Decode {
        function: function.to_string(),
        message: e.to_string(),
    })
}
