// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability tracking for optional backend functions.
//!
//! Some deployments do not expose every RPC function. Once a function is
//! known to be missing, callers skip it until the retry interval elapses
//! instead of failing on every call.

use std::time::{Duration, Instant};

/// How long an unavailable function is skipped before it is tried again.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(300);

/// Last known availability of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// Never called.
    #[default]
    Unknown,
    /// The last call reached the function.
    Available,
    /// The last call reported the function as missing.
    Unavailable,
}

/// Circuit breaker for a single optional function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAvailability {
    state: Availability,
    last_checked_at: Option<Instant>,
    retry_interval: Duration,
}

impl FunctionAvailability {
    /// Creates a tracker in the `Unknown` state.
    ///
    /// # Arguments
    ///
    /// * `retry_interval` - How long to skip the function once unavailable
    #[must_use]
    pub const fn new(retry_interval: Duration) -> Self {
        Self {
            state: Availability::Unknown,
            last_checked_at: None,
            retry_interval,
        }
    }

    #[must_use]
    pub const fn state(&self) -> Availability {
        self.state
    }

    #[must_use]
    pub const fn last_checked_at(&self) -> Option<Instant> {
        self.last_checked_at
    }

    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Returns whether the function should be called at `now`.
    ///
    /// Unavailable functions are retried once the retry interval has elapsed
    /// since the last check.
    #[must_use]
    pub fn should_attempt(&self, now: Instant) -> bool {
        match self.state {
            Availability::Unknown | Availability::Available => true,
            Availability::Unavailable => self
                .last_checked_at
                .is_none_or(|checked| now.saturating_duration_since(checked) >= self.retry_interval),
        }
    }

    /// Records a call that reached the function.
    pub fn mark_available(&mut self, now: Instant) {
        self.state = Availability::Available;
        self.last_checked_at = Some(now);
    }

    /// Records a call that found the function missing.
    pub fn mark_unavailable(&mut self, now: Instant) {
        if self.state != Availability::Unavailable {
            tracing::warn!(
                retry_secs = self.retry_interval.as_secs(),
                "function unavailable; skipping until retry interval elapses"
            );
        }
        self.state = Availability::Unavailable;
        self.last_checked_at = Some(now);
    }
}

impl Default for FunctionAvailability {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_INTERVAL)
    }
}
