use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use manse_breaker::{BreakerConfig, CircuitState, HealthStatus};
use manse_resolve::{
    CalendarResolver, CalendarSource, InvalidResolverConfig, ResolutionRequest, ResolveError,
    ResolverConfig,
};
use manse_tables::{CalendarRecord, LunarDate, SolarDate};
use manse_upstream::{RetryPolicy, UpstreamError};

/// Scripted upstream double: pops scripted responses, then repeats the
/// fallback response, counting every call.
struct MockSource {
    script: Mutex<VecDeque<Result<CalendarRecord, UpstreamError>>>,
    fallback: Result<CalendarRecord, UpstreamError>,
    delay: Duration,
    calls: AtomicU32,
}

impl MockSource {
    fn always(fallback: Result<CalendarRecord, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        })
    }

    fn scripted(
        script: Vec<Result<CalendarRecord, UpstreamError>>,
        fallback: Result<CalendarRecord, UpstreamError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        })
    }

    fn slow(fallback: Result<CalendarRecord, UpstreamError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            delay,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CalendarSource for MockSource {
    fn fetch(&self, _request: &ResolutionRequest) -> Result<CalendarRecord, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => self.fallback.clone(),
        }
    }
}

fn solar(year: i32, month: u8, day: u8) -> SolarDate {
    SolarDate::new(year, month, day).unwrap()
}

fn lunar(year: i32, month: u8, day: u8) -> LunarDate {
    LunarDate::new(year, month, day, false).unwrap()
}

fn jan1_2024() -> ResolutionRequest {
    ResolutionRequest::SolarToLunar(solar(2024, 1, 1))
}

fn jan1_2024_record() -> CalendarRecord {
    CalendarRecord {
        solar: solar(2024, 1, 1),
        lunar: lunar(2023, 11, 20),
    }
}

fn transport() -> UpstreamError {
    UpstreamError::Transport("connection refused".into())
}

/// Config with no real sleeps: single attempt, tiny backoff and cooldown.
fn fast_config() -> ResolverConfig {
    ResolverConfig {
        retry: RetryPolicy {
            max_attempts: 1,
            base_backoff: Duration::from_millis(1),
        },
        breaker: BreakerConfig {
            failure_threshold: 5,
            success_threshold: 1,
            cooldown: Duration::from_millis(40),
        },
        ..ResolverConfig::default()
    }
}

#[test]
fn cached_response_prevents_a_second_upstream_call() {
    let source = MockSource::always(Ok(jan1_2024_record()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    let first = resolver.resolve(jan1_2024()).unwrap();
    let second = resolver.resolve(jan1_2024()).unwrap();
    assert_eq!(first, second);
    assert_eq!(source.calls(), 1, "second resolution must be a cache hit");
}

#[test]
fn upstream_outage_falls_back_to_the_local_tables() {
    let source = MockSource::always(Err(transport()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    let record = resolver.resolve(jan1_2024()).unwrap();
    assert_eq!(record, jan1_2024_record());
    assert_eq!(source.calls(), 1);
}

#[test]
fn breaker_opens_after_five_failures_and_skips_the_upstream() {
    let source = MockSource::always(Err(transport()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    // Five distinct uncached requests, each one failed upstream burst.
    for day in 1..=5u8 {
        let request = ResolutionRequest::SolarToLunar(solar(2024, 1, day));
        resolver.resolve(request).expect("fallback must resolve");
    }
    assert_eq!(source.calls(), 5);

    let report = resolver.health_report();
    assert_eq!(report.breaker.state, CircuitState::Open);
    assert_eq!(report.snapshot.status, HealthStatus::Down);
    assert_eq!(report.snapshot.total_failures, 5);

    // The sixth request is gated by the open circuit yet still resolves.
    let request = ResolutionRequest::SolarToLunar(solar(2024, 1, 6));
    resolver.resolve(request).expect("fallback must resolve");
    assert_eq!(source.calls(), 5, "open circuit must not reach the upstream");
}

#[test]
fn out_of_range_year_propagates_the_original_upstream_error() {
    let source = MockSource::always(Err(transport()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    let request = ResolutionRequest::SolarToLunar(solar(2300, 1, 1));
    assert_eq!(
        resolver.resolve(request).unwrap_err(),
        ResolveError::Upstream(transport())
    );
}

#[test]
fn out_of_range_year_with_open_circuit_reports_circuit_open() {
    let source = MockSource::always(Err(transport()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    for day in 1..=5u8 {
        let request = ResolutionRequest::SolarToLunar(solar(2024, 1, day));
        resolver.resolve(request).unwrap();
    }
    assert_eq!(resolver.health_report().breaker.state, CircuitState::Open);

    let request = ResolutionRequest::SolarToLunar(solar(2300, 1, 1));
    assert!(matches!(
        resolver.resolve(request).unwrap_err(),
        ResolveError::CircuitOpen { .. }
    ));
    assert_eq!(source.calls(), 5, "no attempt may be made while open");
}

#[test]
fn rejections_are_reported_once_without_retries() {
    let source = MockSource::always(Err(UpstreamError::Rejected {
        code: "22".into(),
        message: "LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS".into(),
    }));
    let config = ResolverConfig {
        retry: RetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1),
        },
        ..fast_config()
    };
    let resolver = CalendarResolver::new(Arc::clone(&source), config).unwrap();

    resolver.resolve(jan1_2024()).unwrap();
    assert_eq!(source.calls(), 1, "rejections must not be retried");
    assert_eq!(resolver.health_report().snapshot.total_failures, 1);
}

#[test]
fn transient_failures_use_the_full_retry_budget() {
    let source = MockSource::always(Err(UpstreamError::Timeout));
    let config = ResolverConfig {
        retry: RetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1),
        },
        ..fast_config()
    };
    let resolver = CalendarResolver::new(Arc::clone(&source), config).unwrap();

    resolver.resolve(jan1_2024()).unwrap();
    assert_eq!(source.calls(), 3, "transient failures retry up to the limit");
    assert_eq!(
        resolver.health_report().snapshot.total_failures,
        1,
        "one burst reports one failure to the breaker"
    );
}

#[test]
fn recovered_upstream_closes_the_breaker_through_half_open() {
    let source = MockSource::scripted(
        vec![
            Err(transport()),
            Err(transport()),
            Err(transport()),
            Err(transport()),
            Err(transport()),
        ],
        Ok(jan1_2024_record()),
    );
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    for day in 1..=5u8 {
        let request = ResolutionRequest::SolarToLunar(solar(2024, 1, day));
        resolver.resolve(request).unwrap();
    }
    assert_eq!(resolver.health_report().breaker.state, CircuitState::Open);

    // After the cooldown the probe goes through and succeeds.
    thread::sleep(Duration::from_millis(60));
    let record = resolver.resolve(jan1_2024()).unwrap();
    assert_eq!(record, jan1_2024_record());
    assert_eq!(source.calls(), 6);
    assert_eq!(resolver.health_report().breaker.state, CircuitState::Closed);
}

#[test]
fn concurrent_callers_for_one_key_share_a_single_upstream_call() {
    let source = MockSource::slow(Ok(jan1_2024_record()), Duration::from_millis(60));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    thread::scope(|scope| {
        let a = scope.spawn(|| resolver.resolve(jan1_2024()));
        // Give the leader a head start so the second call coalesces.
        thread::sleep(Duration::from_millis(10));
        let b = scope.spawn(|| resolver.resolve(jan1_2024()));
        let a = a.join().unwrap().unwrap();
        let b = b.join().unwrap().unwrap();
        assert_eq!(a, b);
    });
    assert_eq!(source.calls(), 1, "followers must reuse the leader's flight");
}

#[test]
fn an_expired_deadline_never_reaches_the_upstream() {
    let source = MockSource::always(Ok(jan1_2024_record()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    let expired = Instant::now() - Duration::from_millis(10);
    // The burst is abandoned; the year is in range, so the fallback answers.
    let record = resolver.resolve_by(jan1_2024(), expired).unwrap();
    assert_eq!(record, jan1_2024_record());
    assert_eq!(source.calls(), 0);
}

#[test]
fn successful_latency_reaches_the_health_snapshot() {
    let source = MockSource::slow(Ok(jan1_2024_record()), Duration::from_millis(20));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    resolver.resolve(jan1_2024()).unwrap();
    let snapshot = resolver.health_report().snapshot;
    assert_eq!(snapshot.total_successes, 1);
    assert!(
        snapshot.average_response_time_ms.unwrap() >= 15,
        "latency {:?} should reflect the slow source",
        snapshot.average_response_time_ms
    );
}

#[test]
fn term_queries_cover_years_beyond_the_tables() {
    let source = MockSource::always(Ok(jan1_2024_record()));
    let resolver = CalendarResolver::new(Arc::clone(&source), fast_config()).unwrap();

    let records = resolver.solar_terms_for_year(2300).unwrap();
    assert_eq!(records.len(), 24);
    for pair in records.windows(2) {
        assert!(pair[0].timestamp_utc_millis < pair[1].timestamp_utc_millis);
        assert_eq!(
            (pair[0].longitude_degrees + 15) % 360,
            pair[1].longitude_degrees
        );
    }
    assert_eq!(source.calls(), 0, "term queries never touch the upstream");
}

#[test]
fn unsupported_year_range_is_rejected_at_construction() {
    let source = MockSource::always(Ok(jan1_2024_record()));
    let config = ResolverConfig {
        min_year: 1800,
        ..ResolverConfig::default()
    };
    let error = CalendarResolver::new(source, config)
        .err()
        .expect("construction must fail for an uncovered range");
    assert_eq!(
        error,
        InvalidResolverConfig::UnsupportedYearRange {
            min: 1800,
            max: 2200,
        }
    );
}
