//! Circuit state types.

use std::fmt;
use std::time::Duration;

/// The three breaker states. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, calls pass through.
    Closed,
    /// Failing fast, calls are denied until the cooldown elapses.
    Open,
    /// Probing recovery, a limited number of calls are let through.
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half_open"),
        }
    }
}

/// Point-in-time view of the breaker's internal state, for operational
/// visibility. `retry_in` is populated only while the circuit is OPEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerStateView {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub half_open_successes: u32,
    /// Time remaining until the next permitted attempt, while OPEN.
    pub retry_in: Option<Duration>,
    /// Elapsed time since the last state transition.
    pub since_last_transition: Duration,
}
