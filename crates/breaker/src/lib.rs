//! # manse-breaker
//!
//! Circuit breaker and health monitoring for the unreliable upstream
//! calendar API.
//!
//! The breaker moves through three states:
//!
//! ```text
//!            failure_threshold reached
//!   CLOSED ────────────────────────────▶ OPEN
//!     ▲                                   │ cooldown elapses,
//!     │ success_threshold reached         │ next attempt permitted
//!     │                                   ▼
//!     └─────────────────────────────  HALF_OPEN
//!                 (any failure in HALF_OPEN reopens immediately)
//! ```
//!
//! A direct OPEN → CLOSED transition on an unexpected success is tolerated
//! defensively. The monitor also derives a read-only [`HealthSnapshot`]
//! after every recorded outcome.
//!
//! # Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use manse_breaker::{BreakerConfig, HealthMonitor};
//!
//! let monitor = HealthMonitor::new(BreakerConfig::default());
//! assert!(monitor.can_attempt().is_allowed());
//! monitor.record_success(Duration::from_millis(120));
//! ```

mod config;
mod monitor;
mod state;

pub use config::{BreakerConfig, InvalidBreakerConfig};
pub use monitor::{AttemptDecision, HealthMonitor, HealthSnapshot, HealthStatus};
pub use state::{BreakerStateView, CircuitState};
