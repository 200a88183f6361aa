//! Resolver configuration.

use std::time::Duration;

use manse_breaker::{BreakerConfig, InvalidBreakerConfig};
use manse_upstream::RetryPolicy;

/// Tunables for the resolution pipeline: cache shapes, retry budget,
/// breaker thresholds, and the supported year range. Nothing here is
/// hard-coded at the call sites, so deployments can tune each knob.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Entries held by the upstream-response cache.
    pub response_cache_capacity: usize,
    /// Visibility window for memoized upstream responses.
    pub response_cache_ttl: Duration,
    /// Entries held by the per-year solar-term cache.
    pub term_cache_capacity: usize,
    /// Visibility window for term lookups; long, since the underlying
    /// tables are immutable.
    pub term_cache_ttl: Duration,
    /// Retry budget for one upstream attempt burst.
    pub retry: RetryPolicy,
    /// Circuit breaker thresholds and cooldown.
    pub breaker: BreakerConfig,
    /// Lower bound of the locally resolvable year range.
    pub min_year: i32,
    /// Upper bound of the locally resolvable year range.
    pub max_year: i32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            response_cache_capacity: 256,
            response_cache_ttl: Duration::from_secs(300),
            term_cache_capacity: 512,
            term_cache_ttl: Duration::from_secs(86_400),
            retry: RetryPolicy::default(),
            breaker: BreakerConfig::default(),
            min_year: 1900,
            max_year: 2200,
        }
    }
}

/// Returned when a [`ResolverConfig`] holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidResolverConfig {
    #[error(transparent)]
    Breaker(#[from] InvalidBreakerConfig),
    #[error("retry attempts must be at least 1")]
    ZeroRetryAttempts,
    #[error("year range {min}..={max} is not covered by the local tables")]
    UnsupportedYearRange { min: i32, max: i32 },
}

impl ResolverConfig {
    /// Checks the configuration for degenerate values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResolverConfig`] for zero retry attempts or bad
    /// breaker thresholds. Year-range coverage is checked against the table
    /// data when the resolver is built.
    pub fn validate(&self) -> Result<(), InvalidResolverConfig> {
        self.breaker.validate()?;
        if self.retry.max_attempts == 0 {
            return Err(InvalidResolverConfig::ZeroRetryAttempts);
        }
        Ok(())
    }
}
