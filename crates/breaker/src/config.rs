//! Breaker configuration.

use std::time::Duration;

/// Thresholds and cooldown for the circuit breaker.
///
/// All values are construction-time configuration, not hard-coded constants,
/// so deployments can tune them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures in CLOSED before the circuit opens.
    pub failure_threshold: u32,
    /// Consecutive successes in HALF_OPEN before the circuit closes.
    pub success_threshold: u32,
    /// How long the circuit stays OPEN before permitting a probe.
    pub cooldown: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            success_threshold: 2,
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Returned when a [`BreakerConfig`] holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBreakerConfig {
    #[error("failure threshold must be at least 1")]
    ZeroFailureThreshold,
    #[error("success threshold must be at least 1")]
    ZeroSuccessThreshold,
}

impl BreakerConfig {
    /// Checks the configuration for degenerate values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBreakerConfig`] if either threshold is zero.
    pub fn validate(&self) -> Result<(), InvalidBreakerConfig> {
        if self.failure_threshold == 0 {
            return Err(InvalidBreakerConfig::ZeroFailureThreshold);
        }
        if self.success_threshold == 0 {
            return Err(InvalidBreakerConfig::ZeroSuccessThreshold);
        }
        Ok(())
    }
}
