// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay used for filter changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Runs only the last of a burst of scheduled tasks.
///
/// Scheduling a task cancels the one still waiting for its delay. A task
/// whose delay has elapsed is already running and is left to finish; its
/// result is expected to be discarded through a `RequestSequence`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Scheduled>>,
}

/// A spawned task and the flag claimed by whichever of the timer or a
/// cancellation gets to it first.
#[derive(Debug)]
struct Scheduled {
    handle: JoinHandle<()>,
    claimed: Arc<AtomicBool>,
}

impl Scheduled {
    /// Aborts the task if it has not started running. Returns whether it did.
    fn cancel_if_waiting(self) -> bool {
        if self.claimed.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.handle.abort();
        true
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run after the delay, cancelling any task still
    /// waiting for its own delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay: Duration = self.delay;
        let claimed: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
        let timer_claim: Arc<AtomicBool> = Arc::clone(&claimed);
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if timer_claim.swap(true, Ordering::AcqRel) {
                return;
            }
            task.await;
        });

        let previous: Option<Scheduled> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Scheduled { handle, claimed });
        if let Some(previous) = previous {
            if previous.cancel_if_waiting() {
                tracing::trace!("debounced pending task");
            } else {
                tracing::trace!("previous task already running");
            }
        }
    }

    /// Cancels the pending task if it is still waiting for its delay.
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.cancel_if_waiting();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
