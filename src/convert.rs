//! Builds library configs from the TOML layer.

use std::time::Duration;

use anyhow::{Context, Result};

use manse_breaker::BreakerConfig;
use manse_resolve::ResolverConfig;
use manse_upstream::{ClientConfig, RetryPolicy};

use crate::config::ManseConfig;

/// Builds the HTTP client configuration.
///
/// The service key falls back to the `MANSE_SERVICE_KEY` environment
/// variable; without one, upstream calls will be rejected and resolutions
/// run on the local tables alone.
pub fn build_client_config(config: &ManseConfig) -> ClientConfig {
    let service_key = config
        .upstream
        .service_key
        .clone()
        .or_else(|| std::env::var("MANSE_SERVICE_KEY").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "no service key (set [upstream].service_key or MANSE_SERVICE_KEY); \
                 resolutions will rely on the local tables"
            );
            String::new()
        });
    ClientConfig {
        base_url: config.upstream.base_url.clone(),
        service_key,
        attempt_timeout: Duration::from_millis(config.upstream.attempt_timeout_ms),
        connect_timeout: Duration::from_millis(config.upstream.connect_timeout_ms),
    }
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Result<(i32, u8, u8)> {
    let mut parts = raw.splitn(3, '-');
    let parse = |part: Option<&str>, what: &str| -> Result<i64> {
        part.ok_or_else(|| anyhow::anyhow!("missing {what} in date {raw:?}"))?
            .parse::<i64>()
            .with_context(|| format!("invalid {what} in date {raw:?}"))
    };
    let year = parse(parts.next(), "year")?;
    let month = parse(parts.next(), "month")?;
    let day = parse(parts.next(), "day")?;
    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        anyhow::bail!("date {raw:?} out of range");
    }
    Ok((year as i32, month as u8, day as u8))
}

/// Parses an `HH:MM` time-of-day string.
pub fn parse_time(raw: &str) -> Result<(u8, u8)> {
    let (hour, minute) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("expected HH:MM, got {raw:?}"))?;
    let hour: u8 = hour.parse().with_context(|| format!("invalid hour in {raw:?}"))?;
    let minute: u8 = minute
        .parse()
        .with_context(|| format!("invalid minute in {raw:?}"))?;
    if hour > 23 || minute > 59 {
        anyhow::bail!("time of day {raw:?} out of range");
    }
    Ok((hour, minute))
}

/// Builds the resolver configuration.
pub fn build_resolver_config(config: &ManseConfig) -> ResolverConfig {
    ResolverConfig {
        response_cache_capacity: config.cache.response_capacity,
        response_cache_ttl: Duration::from_secs(config.cache.response_ttl_secs),
        term_cache_capacity: config.cache.term_capacity,
        term_cache_ttl: Duration::from_secs(config.cache.term_ttl_secs),
        retry: RetryPolicy {
            max_attempts: config.retry.max_attempts,
            base_backoff: Duration::from_millis(config.retry.base_backoff_ms),
        },
        breaker: BreakerConfig {
            failure_threshold: config.breaker.failure_threshold,
            success_threshold: config.breaker.success_threshold,
            cooldown: Duration::from_secs(config.breaker.cooldown_secs),
        },
        min_year: config.range.min_year,
        max_year: config.range.max_year,
    }
}

/// Loads the TOML file if it exists, otherwise returns defaults.
pub fn load_config(path: &std::path::Path) -> Result<ManseConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(ManseConfig::default());
    }
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
