// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod activity;
mod comparison;
mod debounce;
mod error;
mod http;
mod periods;
mod rpc;
mod sequence;

#[cfg(test)]
mod tests;

pub use activity::{ActivityLogger, LogOutcome};
pub use comparison::{ComparisonService, ComparisonState};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{ComparisonError, RpcError};
pub use http::{HttpRpcClient, HttpRpcConfig};
pub use periods::{list_available_periods, parse_period_list, recent_weeks};
pub use rpc::{CallOptions, DashboardRpc, RpcClient, functions};
pub use sequence::{RequestSequence, RequestTicket};
