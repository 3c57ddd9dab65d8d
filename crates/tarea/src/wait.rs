//! Bounded polling for eventually-consistent observations.
//!
//! The application persists to storage slightly after the UI updates, so the
//! storage verifications cannot assert instantaneously. Both of them go
//! through the single [`wait_until`] primitive here: poll a probe until it
//! reports satisfied, or fail with the probe's last mismatch once the
//! timeout window closes.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::{TodoError, TodoResult};

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `probe` until it holds or the timeout window closes.
///
/// The probe returns `Ok(None)` once the condition is satisfied, or
/// `Ok(Some(mismatch))` describing why it is not yet satisfied. The probe
/// always runs at least once. On timeout the last mismatch description is
/// folded into the [`TodoError::AssertionFailed`] that fails the scenario;
/// probe errors (a failed driver read) propagate immediately.
pub async fn wait_until<F, Fut>(options: &WaitOptions, mut probe: F) -> TodoResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TodoResult<Option<String>>>,
{
    let start = Instant::now();
    let mut last_mismatch;

    loop {
        match probe().await? {
            None => return Ok(()),
            Some(mismatch) => last_mismatch = mismatch,
        }

        if start.elapsed() >= options.timeout() {
            return Err(TodoError::AssertionFailed {
                message: format!(
                    "condition not met within {}ms: {last_mismatch}",
                    options.timeout_ms
                ),
            });
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}
