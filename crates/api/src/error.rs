// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use painel_domain::ValidationError;
use thiserror::Error;

/// Errors raised by the RPC boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The backend does not expose the function.
    #[error("RPC function '{function}' not found")]
    FunctionNotFound { function: String },

    /// The parameters were rejected before the call was made.
    #[error("Invalid RPC parameters: {0}")]
    InvalidParams(#[from] ValidationError),

    /// The call did not complete in time.
    #[error("RPC function '{function}' timed out")]
    Timeout { function: String },

    /// The backend answered with an error status.
    #[error("RPC function '{function}' failed with status {status}: {message}")]
    Status {
        function: String,
        status: u16,
        message: String,
    },

    /// The request could not be sent or the response not received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Invalid response from '{function}': {message}")]
    Decode { function: String, message: String },
}

/// Errors raised while comparing periods.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// Fewer than two periods were selected.
    #[error("Selecione pelo menos 2 semanas para comparar (selecionadas: {selected})")]
    InsufficientPeriods { selected: usize },

    /// A period label could not be parsed.
    #[error("Semana inválida: '{label}'")]
    InvalidPeriod { label: String },

    /// A period filter failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The dashboard snapshot of a period could not be fetched.
    #[error("Erro ao carregar dados da semana {period}: {source}")]
    Snapshot {
        period: String,
        #[source]
        source: RpcError,
    },
}
