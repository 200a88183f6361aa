//! The upstream source seam.

use std::sync::Arc;

use manse_tables::CalendarRecord;
use manse_upstream::{HttpClient, UpstreamError};

use crate::request::ResolutionRequest;

/// Anything that can answer a conversion request remotely.
///
/// The orchestrator is generic over this trait so tests can inject counting
/// doubles and scripted failures; production wires in
/// [`manse_upstream::HttpClient`].
pub trait CalendarSource: Send + Sync {
    /// Performs one attempt against the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] classifying the failure for retry and
    /// breaker reporting.
    fn fetch(&self, request: &ResolutionRequest) -> Result<CalendarRecord, UpstreamError>;
}

impl CalendarSource for HttpClient {
    fn fetch(&self, request: &ResolutionRequest) -> Result<CalendarRecord, UpstreamError> {
        match request {
            ResolutionRequest::SolarToLunar(date) => self.solar_to_lunar(*date),
            ResolutionRequest::LunarToSolar(date) => self.lunar_to_solar(*date),
        }
    }
}

impl<T: CalendarSource> CalendarSource for Arc<T> {
    fn fetch(&self, request: &ResolutionRequest) -> Result<CalendarRecord, UpstreamError> {
        (**self).fetch(request)
    }
}
