//! The resolution orchestrator and downstream interface.

use std::time::Instant;

use tracing::{debug, info};

use manse_astro::term::ALL_TERMS;
use manse_astro::{
    SolarTerm, SolarTermSolver, from_julian_day, julian_day_to_unix_millis,
    unix_millis_to_julian_day,
};
use manse_breaker::{AttemptDecision, BreakerStateView, HealthMonitor, HealthSnapshot};
use manse_cache::TieredCache;
use manse_tables::{
    CalendarRecord, LocalStore, SolarTermRecord, TableError, lunar_to_solar, solar_to_lunar,
};
use manse_upstream::run_with_retry;

use crate::coalesce::{FlightMap, FlightRole};
use crate::config::{InvalidResolverConfig, ResolverConfig};
use crate::error::ResolveError;
use crate::request::ResolutionRequest;
use crate::source::CalendarSource;

/// Operational health view: the derived snapshot plus the raw breaker
/// state.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub snapshot: HealthSnapshot,
    pub breaker: BreakerStateView,
}

/// Composes cache, circuit breaker, upstream source, and local fallback
/// into one resolution pipeline.
///
/// The resolver owns its health monitor and caches; nothing here is a
/// process-wide singleton, so tests run isolated instances side by side.
pub struct CalendarResolver<S> {
    source: S,
    monitor: HealthMonitor,
    store: LocalStore,
    response_cache: TieredCache<ResolutionRequest, CalendarRecord>,
    term_cache: TieredCache<i32, Vec<SolarTermRecord>>,
    config: ResolverConfig,
    flights: FlightMap,
    solver: SolarTermSolver,
}

impl<S: CalendarSource> CalendarResolver<S> {
    /// Builds a resolver over `source` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResolverConfig`] for degenerate thresholds or a
    /// year range the local tables cannot serve.
    pub fn new(source: S, config: ResolverConfig) -> Result<Self, InvalidResolverConfig> {
        config.validate()?;
        let store = LocalStore::with_year_range(config.min_year, config.max_year).map_err(
            |_| InvalidResolverConfig::UnsupportedYearRange {
                min: config.min_year,
                max: config.max_year,
            },
        )?;
        Ok(Self {
            source,
            monitor: HealthMonitor::new(config.breaker),
            store,
            response_cache: TieredCache::new(
                config.response_cache_capacity,
                config.response_cache_ttl,
            ),
            term_cache: TieredCache::new(config.term_cache_capacity, config.term_cache_ttl),
            config,
            flights: FlightMap::new(),
            solver: SolarTermSolver::new(),
        })
    }

    /// The local fallback store backing this resolver.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Resolves a conversion request with no overall deadline.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`]; for years inside the supported range this only
    /// fails when the date itself does not exist.
    pub fn resolve(&self, request: ResolutionRequest) -> Result<CalendarRecord, ResolveError> {
        self.resolve_inner(request, None)
    }

    /// Resolves with a caller-supplied deadline bounding the whole call:
    /// retries, backoff sleeps, and waiting on a coalesced flight.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), plus
    /// [`ResolveError::DeadlineExceeded`] when the deadline elapses first.
    pub fn resolve_by(
        &self,
        request: ResolutionRequest,
        deadline: Instant,
    ) -> Result<CalendarRecord, ResolveError> {
        self.resolve_inner(request, Some(deadline))
    }

    fn resolve_inner(
        &self,
        request: ResolutionRequest,
        deadline: Option<Instant>,
    ) -> Result<CalendarRecord, ResolveError> {
        if let Some(record) = self.response_cache.get(&request) {
            debug!(%request, "cache hit");
            return Ok(record);
        }

        match self.flights.join(request) {
            FlightRole::Follower(flight) => {
                debug!(%request, "joining in-flight resolution");
                flight.wait(deadline)
            }
            FlightRole::Leader(flight) => {
                let result = self.resolve_uncoalesced(&request, deadline);
                self.flights.complete(&request, &flight, result.clone());
                result
            }
        }
    }

    fn resolve_uncoalesced(
        &self,
        request: &ResolutionRequest,
        deadline: Option<Instant>,
    ) -> Result<CalendarRecord, ResolveError> {
        let upstream_result: Result<CalendarRecord, ResolveError> =
            match self.monitor.can_attempt() {
                AttemptDecision::Allowed => {
                    let outcome = run_with_retry(&self.config.retry, deadline, |attempt| {
                        debug!(%request, attempt, "attempting upstream resolution");
                        let started = Instant::now();
                        self.source
                            .fetch(request)
                            .map(|record| (record, started.elapsed()))
                    });
                    match outcome {
                        Ok((record, latency)) => {
                            self.monitor.record_success(latency);
                            self.response_cache.set(*request, record);
                            debug!(%request, latency_ms = latency.as_millis() as u64,
                                "resolved upstream");
                            return Ok(record);
                        }
                        Err(error) => {
                            self.monitor.record_failure(&error.to_string());
                            Err(error.into())
                        }
                    }
                }
                AttemptDecision::Denied { retry_in } => {
                    debug!(%request, ?retry_in, "circuit open; skipping upstream");
                    Err(ResolveError::CircuitOpen { retry_in })
                }
            };

        let original = match upstream_result {
            Ok(record) => return Ok(record),
            Err(error) => error,
        };

        if self.store.contains_year(request.year()) {
            let record = self.local_equivalent(request)?;
            info!(%request, %original, "resolved via local fallback");
            Ok(record)
        } else {
            Err(original)
        }
    }

    fn local_equivalent(&self, request: &ResolutionRequest) -> Result<CalendarRecord, TableError> {
        match request {
            ResolutionRequest::SolarToLunar(date) => {
                let lunar = solar_to_lunar(&self.store, *date)?;
                Ok(CalendarRecord {
                    solar: *date,
                    lunar,
                })
            }
            ResolutionRequest::LunarToSolar(date) => {
                let solar = lunar_to_solar(&self.store, *date)?;
                Ok(CalendarRecord {
                    solar,
                    lunar: *date,
                })
            }
        }
    }

    /// All 24 term records for a civil year, in timestamp order.
    ///
    /// Years inside the supported range are served from the precomputed
    /// tables; outside it, the records are computed directly from the
    /// astronomical solver. Either way the result is memoized in the
    /// long-TTL term cache.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Table`] only for table-internal failures;
    /// out-of-range years succeed via direct computation.
    pub fn solar_terms_for_year(&self, year: i32) -> Result<Vec<SolarTermRecord>, ResolveError> {
        if let Some(records) = self.term_cache.get(&year) {
            return Ok(records);
        }
        let records = if self.store.contains_year(year) {
            self.store.year_solar_terms(year)?
        } else {
            debug!(year, "computing solar terms outside the table range");
            self.compute_year_terms(year)
        };
        self.term_cache.set(year, records.clone());
        Ok(records)
    }

    /// First solar term strictly after a UTC timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Table`] if neither the tables nor direct
    /// computation cover the instant.
    pub fn next_solar_term(&self, millis: i64) -> Result<SolarTermRecord, ResolveError> {
        match self.store.next_term_after(millis) {
            Ok(record) => Ok(record),
            Err(TableError::TimestampOutsideSpan { .. }) => {
                let year = self.civil_year_of(millis);
                for candidate in [year, year + 1] {
                    let records = self.solar_terms_for_year(candidate)?;
                    if let Some(record) = records
                        .iter()
                        .find(|r| r.timestamp_utc_millis > millis)
                    {
                        return Ok(*record);
                    }
                }
                Err(TableError::TimestampOutsideSpan { millis }.into())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Last solar term at or before a UTC timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Table`] if neither the tables nor direct
    /// computation cover the instant.
    pub fn nearest_solar_term(&self, millis: i64) -> Result<SolarTermRecord, ResolveError> {
        match self.store.nearest_term_before(millis) {
            Ok(record) => Ok(record),
            Err(TableError::TimestampOutsideSpan { .. }) => {
                let year = self.civil_year_of(millis);
                for candidate in [year, year - 1] {
                    let records = self.solar_terms_for_year(candidate)?;
                    if let Some(record) = records
                        .iter()
                        .rev()
                        .find(|r| r.timestamp_utc_millis <= millis)
                    {
                        return Ok(*record);
                    }
                }
                Err(TableError::TimestampOutsideSpan { millis }.into())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Current health snapshot and breaker state.
    pub fn health_report(&self) -> HealthReport {
        HealthReport {
            snapshot: self.monitor.snapshot(),
            breaker: self.monitor.state_view(),
        }
    }

    fn civil_year_of(&self, millis: i64) -> i32 {
        from_julian_day(unix_millis_to_julian_day(millis)).year
    }

    fn compute_year_terms(&self, year: i32) -> Vec<SolarTermRecord> {
        ALL_TERMS
            .iter()
            .map(|&term| {
                let cycle_year = if term == SolarTerm::WinterSolstice {
                    year + 1
                } else {
                    year
                };
                let solution = self.solver.solve(cycle_year, term.longitude_degrees() as f64);
                SolarTermRecord {
                    year,
                    term,
                    timestamp_utc_millis: julian_day_to_unix_millis(solution.julian_day),
                    longitude_degrees: term.longitude_degrees(),
                }
            })
            .collect()
    }
}
