//! Bounded retries with exponential backoff.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::UpstreamError;

/// Retry budget for one resolution's attempt burst.
///
/// With the defaults (3 attempts, 1 s base), a fully failing burst sleeps
/// 1 s and then 2 s between attempts; each later retry doubles the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles per subsequent retry.
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff to sleep before attempt `attempt` (1-based); zero before the
    /// first attempt.
    pub fn backoff_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        // attempt 2 -> base, attempt 3 -> 2*base, attempt 4 -> 4*base, ...
        self.base_backoff.saturating_mul(1 << (attempt - 2).min(16))
    }
}

/// Runs `operation` under the retry policy, retrying only transient errors.
///
/// The closure receives the 1-based attempt number. Upstream rejections are
/// returned immediately (they will not improve on retry). An optional
/// `deadline` bounds the whole burst: a retry whose backoff would cross it
/// is abandoned and the last transient error is returned instead.
///
/// # Errors
///
/// Returns the final [`UpstreamError`] once attempts or the deadline are
/// exhausted.
pub fn run_with_retry<T>(
    policy: &RetryPolicy,
    deadline: Option<Instant>,
    mut operation: impl FnMut(u32) -> Result<T, UpstreamError>,
) -> Result<T, UpstreamError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        let backoff = policy.backoff_before(attempt);
        if !backoff.is_zero() {
            if let Some(deadline) = deadline {
                if Instant::now() + backoff >= deadline {
                    warn!(attempt, "deadline reached before backoff; abandoning retries");
                    break;
                }
            }
            std::thread::sleep(backoff);
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                warn!(attempt, "deadline reached; abandoning attempt burst");
                break;
            }
        }

        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(error) if error.is_transient() && attempt < max_attempts => {
                warn!(attempt, %error, "transient upstream failure; will retry");
                last_error = Some(error);
            }
            Err(error) => return Err(error),
        }
    }

    // A burst abandoned before its first attempt has no recorded error;
    // classify it as a timeout of the whole burst.
    Err(last_error.unwrap_or(UpstreamError::Timeout))
}
