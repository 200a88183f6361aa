//! # manse-resolve
//!
//! The calendar resolution orchestrator. A resolution walks, in order:
//!
//! ```text
//!  ┌───────┐   ┌─────────────┐   ┌──────────────────┐   ┌────────────────┐
//!  │ cache  │──▶│ circuit     │──▶│ upstream call     │──▶│ local fallback │
//!  │ lookup │   │ breaker gate│   │ (retry + timeout) │   │ (1900–2200)    │
//!  └───────┘   └─────────────┘   └──────────────────┘   └────────────────┘
//! ```
//!
//! Uncached requests make at most one upstream attempt burst; whenever the
//! requested year is inside the supported table range, a resolution returns
//! deterministically even during a total upstream outage. Concurrent callers
//! for the same uncached key are coalesced onto a single in-flight
//! resolution.
//!
//! The crate also exposes the downstream interface consumed by the pillar
//! arithmetic: solar-term queries and the operational health report.

mod coalesce;
mod config;
mod error;
mod orchestrator;
mod request;
mod source;

pub use config::{InvalidResolverConfig, ResolverConfig};
pub use error::ResolveError;
pub use orchestrator::{CalendarResolver, HealthReport};
pub use request::ResolutionRequest;
pub use source::CalendarSource;
