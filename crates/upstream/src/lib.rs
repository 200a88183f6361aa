//! # manse-upstream
//!
//! Blocking HTTP client for the government lunisolar calendar API: query
//! construction, response-envelope parsing, and bounded retries with
//! exponential backoff.
//!
//! The service answers GET requests with a JSON envelope of the shape
//! `{"response": {"header": {...}, "body": {"items": {"item": [...]}}}}`;
//! a call succeeds only when the header carries result code `"00"` and at
//! least one item is present. Every other outcome (transport failures,
//! non-success HTTP statuses, unexpected payloads, explicit rejections) is
//! classified by [`UpstreamError`] so the caller can decide what is worth
//! retrying and what must be reported to the circuit breaker.

mod client;
mod error;
mod response;
mod retry;

pub use client::{ClientConfig, HttpClient};
pub use error::UpstreamError;
pub use response::{ApiEnvelope, parse_envelope};
pub use retry::{RetryPolicy, run_with_retry};
