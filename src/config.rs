use serde::Deserialize;

/// Top-level Manse configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManseConfig {
    /// Upstream service settings.
    #[serde(default)]
    pub upstream: UpstreamToml,

    /// Retry settings for the upstream attempt burst.
    #[serde(default)]
    pub retry: RetryToml,

    /// Circuit breaker settings.
    #[serde(default)]
    pub breaker: BreakerToml,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheToml,

    /// Supported year range for local resolution.
    #[serde(default)]
    pub range: RangeToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamToml {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Service credential; may also come from MANSE_SERVICE_KEY.
    #[serde(default)]
    pub service_key: Option<String>,
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://apis.data.go.kr/B090041/openapi/service/LrsrCldInfoService".to_string()
}

fn default_attempt_timeout_ms() -> u64 {
    5_000
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

impl Default for UpstreamToml {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            service_key: None,
            attempt_timeout_ms: default_attempt_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryToml {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_backoff_ms() -> u64 {
    1_000
}

impl Default for RetryToml {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakerToml {
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    #[serde(default = "default_success_threshold")]
    pub success_threshold: u32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_success_threshold() -> u32 {
    2
}

fn default_cooldown_secs() -> u64 {
    60
}

impl Default for BreakerToml {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            success_threshold: default_success_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheToml {
    #[serde(default = "default_response_capacity")]
    pub response_capacity: usize,
    #[serde(default = "default_response_ttl_secs")]
    pub response_ttl_secs: u64,
    #[serde(default = "default_term_capacity")]
    pub term_capacity: usize,
    #[serde(default = "default_term_ttl_secs")]
    pub term_ttl_secs: u64,
}

fn default_response_capacity() -> usize {
    256
}

fn default_response_ttl_secs() -> u64 {
    300
}

fn default_term_capacity() -> usize {
    512
}

fn default_term_ttl_secs() -> u64 {
    86_400
}

impl Default for CacheToml {
    fn default() -> Self {
        Self {
            response_capacity: default_response_capacity(),
            response_ttl_secs: default_response_ttl_secs(),
            term_capacity: default_term_capacity(),
            term_ttl_secs: default_term_ttl_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeToml {
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_min_year() -> i32 {
    1900
}

fn default_max_year() -> i32 {
    2200
}

impl Default for RangeToml {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: ManseConfig = toml::from_str("").unwrap();
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.breaker.failure_threshold, 5);
        assert_eq!(config.range.min_year, 1900);
        assert_eq!(config.range.max_year, 2200);
        assert!(config.upstream.base_url.starts_with("https://"));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: ManseConfig = toml::from_str(
            r#"
            [breaker]
            failure_threshold = 2

            [range]
            max_year = 2100
            "#,
        )
        .unwrap();
        assert_eq!(config.breaker.failure_threshold, 2);
        assert_eq!(config.breaker.success_threshold, 2);
        assert_eq!(config.range.min_year, 1900);
        assert_eq!(config.range.max_year, 2100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ManseConfig, _> = toml::from_str(
            r#"
            [breaker]
            failure_treshold = 2
            "#,
        );
        assert!(result.is_err(), "typo'd field must be rejected");
    }
}
