// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Best-effort activity logging.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use painel_activity::{ActivityEvent, FunctionAvailability};

use crate::error::RpcError;
use crate::rpc::{CallOptions, RpcClient, functions};

/// What happened to a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The backend recorded the event.
    Recorded,
    /// The function is known to be missing; the event was dropped.
    Skipped,
    /// The call failed; the event was dropped.
    Failed,
}

/// Sends activity events to `registrar_atividade`.
///
/// Logging never fails the caller. When the backend lacks the function, it
/// is skipped until the retry interval of its availability tracker elapses.
#[derive(Debug)]
pub struct ActivityLogger<C> {
    client: Arc<C>,
    availability: Mutex<FunctionAvailability>,
}

impl<C: RpcClient> ActivityLogger<C> {
    /// Creates a logger with the default retry interval.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self::with_availability(client, FunctionAvailability::default())
    }

    /// Creates a logger with a custom availability tracker.
    #[must_use]
    pub const fn with_availability(client: Arc<C>, availability: FunctionAvailability) -> Self {
        Self {
            client,
            availability: Mutex::new(availability),
        }
    }

    /// Creates a logger that retries a missing function after `retry_interval`.
    #[must_use]
    pub fn with_retry_interval(client: Arc<C>, retry_interval: Duration) -> Self {
        Self::with_availability(client, FunctionAvailability::new(retry_interval))
    }

    /// Returns the current availability of the logging function.
    #[must_use]
    pub fn availability(&self) -> FunctionAvailability {
        self.lock().clone()
    }

    /// Logs `event`.
    pub async fn log(&self, event: &ActivityEvent) -> LogOutcome {
        if !self.lock().should_attempt(Instant::now()) {
            tracing::debug!(kind = %event.kind, "activity logging unavailable; skipping event");
            return LogOutcome::Skipped;
        }

        let result: Result<_, RpcError> = self
            .client
            .call(
                functions::REGISTER_ACTIVITY,
                event.to_params(),
                CallOptions::default(),
            )
            .await;

        match result {
            Ok(_) => {
                self.lock().mark_available(Instant::now());
                LogOutcome::Recorded
            }
            Err(RpcError::FunctionNotFound { .. }) => {
                self.lock().mark_unavailable(Instant::now());
                LogOutcome::Failed
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = %event.kind, "failed to log activity");
                LogOutcome::Failed
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FunctionAvailability> {
        self.availability
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
