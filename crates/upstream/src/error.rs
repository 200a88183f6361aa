//! Error types for the manse-upstream crate.

/// Error type for all fallible operations in the manse-upstream crate.
///
/// [`is_transient`](UpstreamError::is_transient) separates errors worth
/// retrying within the same resolution (timeouts, connection failures) from
/// upstream rejections that will not improve on retry (bad statuses,
/// explicit result codes, unparseable payloads, empty result sets).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// The attempt exceeded its configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused connection, broken stream).
    #[error("upstream transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("upstream returned http status {code}")]
    Status { code: u16 },

    /// The service answered well-formed JSON carrying a non-"00" result
    /// code.
    #[error("upstream rejected the request: result code {code} ({message})")]
    Rejected { code: String, message: String },

    /// The response body could not be parsed as the expected envelope.
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    /// A successful envelope with no items for the requested date.
    #[error("upstream returned no matching record")]
    Empty,
}

impl UpstreamError {
    /// Whether a retry within the same resolution could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transience_classification() {
        assert!(UpstreamError::Timeout.is_transient());
        assert!(UpstreamError::Transport("connection refused".into()).is_transient());
        assert!(!UpstreamError::Status { code: 500 }.is_transient());
        assert!(
            !UpstreamError::Rejected {
                code: "99".into(),
                message: "SERVICE ERROR".into(),
            }
            .is_transient()
        );
        assert!(!UpstreamError::Malformed("not json".into()).is_transient());
        assert!(!UpstreamError::Empty.is_transient());
    }

    #[test]
    fn messages() {
        assert_eq!(
            UpstreamError::Status { code: 503 }.to_string(),
            "upstream returned http status 503"
        );
        assert_eq!(
            UpstreamError::Rejected {
                code: "03".into(),
                message: "NODATA_ERROR".into(),
            }
            .to_string(),
            "upstream rejected the request: result code 03 (NODATA_ERROR)"
        );
    }
}
