//! Accept/drop debounce for user-triggered actions
//!
//! Each guard instance tracks one logical action. A call arriving sooner than
//! `min_interval` after the last *accepted* call is dropped without running
//! the action. The window is recorded before the action runs, so re-entrant
//! calls made by the action itself are dropped too.
//!
//! Guards use interior mutability without synchronization and are `!Sync`;
//! callers on several threads must serialize access themselves.

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use recovery_shared::GuardConfig;
use tokio::time::Instant;

/// Per-action submission window
#[derive(Debug)]
pub struct SubmissionGuard {
    min_interval: Duration,
    last_accepted: Cell<Option<Instant>>,
}

impl SubmissionGuard {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: Cell::new(None),
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(Duration::from_millis(config.min_interval_ms))
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Decide whether a call arriving now is accepted, recording it if so
    pub fn try_accept(&self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_accepted.get() {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_interval {
                tracing::trace!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    min_interval_ms = self.min_interval.as_millis() as u64,
                    event = "submission_dropped",
                    "Dropped call inside guard window"
                );
                return false;
            }
        }
        self.last_accepted.set(Some(now));
        true
    }

    /// Run `action` if the call is accepted
    pub fn run<R>(&self, action: impl FnOnce() -> R) -> Option<R> {
        if self.try_accept() {
            Some(action())
        } else {
            None
        }
    }

    /// Start and await `action` if the call is accepted
    pub async fn run_async<F, Fut>(&self, action: F) -> Option<Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        if self.try_accept() {
            Some(action().await)
        } else {
            None
        }
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

/// An action bundled with its own guard
#[derive(Debug)]
pub struct Guarded<F> {
    action: F,
    guard: SubmissionGuard,
}

impl<F, R> Guarded<F>
where
    F: Fn() -> R,
{
    /// Wrap `action` with the default window from [`GuardConfig`]
    pub fn new(action: F) -> Self {
        Self {
            action,
            guard: SubmissionGuard::default(),
        }
    }

    /// Invoke the action, or return `None` if the call was dropped
    pub fn call(&self) -> Option<R> {
        self.guard.run(&self.action)
    }

    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }
}

/// Wrap `action` so that calls closer than `min_interval` to the last
/// accepted one are dropped
pub fn guard<F, R>(action: F, min_interval: Duration) -> Guarded<F>
where
    F: Fn() -> R,
{
    Guarded {
        action,
        guard: SubmissionGuard::new(min_interval),
    }
}
