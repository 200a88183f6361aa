//! The blocking HTTP client.

use std::time::Duration;

use tracing::debug;

use manse_tables::{CalendarRecord, LunarDate, SolarDate};

use crate::error::UpstreamError;
use crate::response::{ApiEnvelope, parse_envelope};

/// Connection settings for the upstream service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL; operation names are appended as path segments.
    pub base_url: String,
    /// Credential passed as the `serviceKey` query parameter.
    pub service_key: String,
    /// Budget for one complete attempt (send + receive).
    pub attempt_timeout: Duration,
    /// Budget for establishing the connection.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://apis.data.go.kr/B090041/openapi/service/LrsrCldInfoService"
                .to_string(),
            service_key: String::new(),
            attempt_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

/// Client for the lunisolar calendar service.
///
/// Each method performs exactly one attempt; retry policy lives with the
/// caller so the circuit breaker sees one report per attempt burst.
pub struct HttpClient {
    agent: ureq::Agent,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout(config.attempt_timeout)
            .build();
        Self { agent, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the lunisolar equivalent of a solar date.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] for transport failures, timeouts, bad
    /// statuses, rejections, and malformed payloads.
    pub fn solar_to_lunar(&self, date: SolarDate) -> Result<CalendarRecord, UpstreamError> {
        self.call(
            "getLunCalInfo",
            &[
                ("solYear", format!("{:04}", date.year())),
                ("solMonth", format!("{:02}", date.month())),
                ("solDay", format!("{:02}", date.day())),
            ],
        )
    }

    /// Fetches the solar equivalent of a lunisolar date.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] for transport failures, timeouts, bad
    /// statuses, rejections, and malformed payloads.
    pub fn lunar_to_solar(&self, date: LunarDate) -> Result<CalendarRecord, UpstreamError> {
        self.call(
            "getSolCalInfo",
            &[
                ("lunYear", format!("{:04}", date.year())),
                ("lunMonth", format!("{:02}", date.month())),
                ("lunDay", format!("{:02}", date.day())),
                (
                    "leapMonth",
                    if date.is_leap_month() { "윤" } else { "평" }.to_string(),
                ),
            ],
        )
    }

    fn call(
        &self,
        operation: &str,
        params: &[(&str, String)],
    ) -> Result<CalendarRecord, UpstreamError> {
        let url = format!("{}/{operation}", self.config.base_url.trim_end_matches('/'));
        let mut request = self
            .agent
            .get(&url)
            .query("serviceKey", &self.config.service_key)
            .query("_type", "json");
        for (name, value) in params {
            request = request.query(name, value);
        }
        debug!(operation, "issuing upstream request");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Err(UpstreamError::Status { code });
            }
            Err(ureq::Error::Transport(transport)) => {
                let message = transport.to_string();
                return Err(if message.contains("timed out") {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::Transport(message)
                });
            }
        };

        let envelope: ApiEnvelope = response
            .into_json()
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        parse_envelope(envelope)
    }
}
