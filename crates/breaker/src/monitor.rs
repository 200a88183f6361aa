//! The health monitor: outcome recording and the breaker state machine.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::config::BreakerConfig;
use crate::state::{BreakerStateView, CircuitState};

/// Whether a call may be attempted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptDecision {
    Allowed,
    /// Denied because the circuit is OPEN; `retry_in` is the time until the
    /// next scheduled probe.
    Denied { retry_in: Duration },
}

impl AttemptDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Coarse upstream health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Down,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Read-only health view, recomputed from recorded outcomes on request.
/// Held in memory only, for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub total_successes: u64,
    pub total_failures: u64,
    pub consecutive_failures: u32,
    /// Mean latency over all recorded successes, if any.
    pub average_response_time_ms: Option<u64>,
    pub last_error: Option<String>,
}

struct Inner {
    state: CircuitState,
    consecutive_failures: u32,
    half_open_successes: u32,
    // meaningful only while state == Open
    next_attempt_at: Option<Instant>,
    last_transition_at: Instant,
    total_successes: u64,
    total_failures: u64,
    total_success_millis: u64,
    last_error: Option<String>,
}

/// Tracks upstream call outcomes and gates attempts through the three-state
/// circuit breaker.
///
/// The monitor is an explicitly constructed component: the orchestrator owns
/// one instance, and tests instantiate isolated ones. All state mutation is
/// serialized behind an interior lock, since the transition sequences are
/// multi-field read-modify-write operations.
pub struct HealthMonitor {
    config: BreakerConfig,
    inner: Mutex<Inner>,
}

impl HealthMonitor {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                half_open_successes: 0,
                next_attempt_at: None,
                last_transition_at: Instant::now(),
                total_successes: 0,
                total_failures: 0,
                total_success_millis: 0,
                last_error: None,
            }),
        }
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Asks whether a call may be attempted.
    ///
    /// While OPEN, the call is permitted only once the cooldown has elapsed,
    /// and permitting it moves the breaker to HALF_OPEN as a side effect.
    pub fn can_attempt(&self) -> AttemptDecision {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => AttemptDecision::Allowed,
            CircuitState::Open => {
                let now = Instant::now();
                let next_at = inner
                    .next_attempt_at
                    .expect("next_attempt_at is set whenever state is Open");
                if now >= next_at {
                    transition(&mut inner, CircuitState::HalfOpen);
                    inner.half_open_successes = 0;
                    inner.next_attempt_at = None;
                    AttemptDecision::Allowed
                } else {
                    AttemptDecision::Denied {
                        retry_in: next_at - now,
                    }
                }
            }
        }
    }

    /// Records a successful upstream call with its observed latency.
    pub fn record_success(&self, response_time: Duration) {
        let mut inner = self.lock();
        inner.total_successes += 1;
        inner.total_success_millis += response_time.as_millis() as u64;
        inner.consecutive_failures = 0;
        match inner.state {
            CircuitState::Closed => {}
            CircuitState::HalfOpen => {
                inner.half_open_successes += 1;
                if inner.half_open_successes >= self.config.success_threshold {
                    transition(&mut inner, CircuitState::Closed);
                    inner.half_open_successes = 0;
                    inner.next_attempt_at = None;
                }
            }
            CircuitState::Open => {
                // A success while OPEN means a caller bypassed can_attempt().
                // Tolerated: the upstream is evidently reachable again.
                warn!("success recorded while circuit open; closing defensively");
                transition(&mut inner, CircuitState::Closed);
                inner.half_open_successes = 0;
                inner.next_attempt_at = None;
            }
        }
    }

    /// Records a failed upstream call.
    pub fn record_failure(&self, error: &str) {
        let mut inner = self.lock();
        inner.total_failures += 1;
        inner.consecutive_failures += 1;
        inner.half_open_successes = 0;
        inner.last_error = Some(error.to_string());
        match inner.state {
            CircuitState::HalfOpen => {
                self.open(&mut inner);
            }
            CircuitState::Closed => {
                if inner.consecutive_failures >= self.config.failure_threshold {
                    self.open(&mut inner);
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Current derived health view.
    pub fn snapshot(&self) -> HealthSnapshot {
        let inner = self.lock();
        let total_calls = inner.total_successes + inner.total_failures;
        let success_rate_below_half =
            total_calls > 0 && inner.total_successes * 2 < total_calls;
        let status = if inner.state == CircuitState::Open {
            HealthStatus::Down
        } else if success_rate_below_half || inner.consecutive_failures >= 3 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };
        HealthSnapshot {
            status,
            total_successes: inner.total_successes,
            total_failures: inner.total_failures,
            consecutive_failures: inner.consecutive_failures,
            average_response_time_ms: (inner.total_successes > 0)
                .then(|| inner.total_success_millis / inner.total_successes),
            last_error: inner.last_error.clone(),
        }
    }

    /// Current breaker state, for operational visibility.
    pub fn state_view(&self) -> BreakerStateView {
        let inner = self.lock();
        let now = Instant::now();
        BreakerStateView {
            state: inner.state,
            consecutive_failures: inner.consecutive_failures,
            half_open_successes: inner.half_open_successes,
            retry_in: inner
                .next_attempt_at
                .map(|at| at.saturating_duration_since(now)),
            since_last_transition: now.saturating_duration_since(inner.last_transition_at),
        }
    }

    fn open(&self, inner: &mut Inner) {
        transition(inner, CircuitState::Open);
        inner.next_attempt_at = Some(Instant::now() + self.config.cooldown);
        warn!(
            cooldown_ms = self.config.cooldown.as_millis() as u64,
            consecutive_failures = inner.consecutive_failures,
            "circuit opened"
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn transition(inner: &mut Inner, to: CircuitState) {
    info!(from = %inner.state, to = %to, "circuit state transition");
    inner.state = to;
    inner.last_transition_at = Instant::now();
}
