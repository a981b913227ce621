//! Per-run configuration.

use super::limits::{LimitExceeded, RunLimits};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cloneable cancellation flag.
///
/// Every clone shares the same flag, so a token handed to another thread (or
/// to an observer) can stop a run that is in progress. The executor checks
/// it once per loop iteration, before invoking the next handler.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Options for [`Machine::run_with`](super::Machine::run_with).
///
/// The default is what [`Machine::run`](super::Machine::run) uses: no limits,
/// no cancellation, no history.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    limits: RunLimits,
    cancel: Option<CancelToken>,
    record_history: bool,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set step and time budgets.
    pub fn limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Watch a cancellation token.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Keep a [`RunHistory`](crate::core::RunHistory) in the report.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn run_limits(&self) -> &RunLimits {
        &self.limits
    }

    pub fn records_history(&self) -> bool {
        self.record_history
    }

    /// Cancellation wins over the budgets.
    pub(crate) fn check(&self, steps: usize, elapsed: Duration) -> Result<(), LimitExceeded> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(LimitExceeded::Cancelled);
        }
        self.limits.check(steps, elapsed)
    }
}
