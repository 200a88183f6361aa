//! Error types for the manse-resolve crate.

use std::time::Duration;

use manse_tables::TableError;
use manse_upstream::UpstreamError;

/// Error type for resolution and term queries.
///
/// Upstream and circuit errors are absorbed into the local fallback whenever
/// the requested year is in range; they surface only when the fallback
/// cannot apply. Table errors (range violations, nonexistent dates) are
/// fatal and never recovered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The upstream call failed and no fallback applied.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The breaker denied the attempt and no fallback applied.
    #[error("circuit open; next attempt permitted in {retry_in:?}")]
    CircuitOpen { retry_in: Duration },

    /// Local table lookup or conversion failure.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The caller-supplied deadline elapsed while waiting for a coalesced
    /// in-flight resolution.
    #[error("resolution deadline exceeded")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_messages_pass_through() {
        let err: ResolveError = UpstreamError::Timeout.into();
        assert_eq!(err.to_string(), "upstream request timed out");

        let err: ResolveError = TableError::YearOutOfRange {
            year: 2300,
            min: 1900,
            max: 2200,
        }
        .into();
        assert_eq!(err.to_string(), "year 2300 outside supported range 1900..=2200");
    }
}
