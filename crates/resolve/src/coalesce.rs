//! In-flight request coalescing.
//!
//! Two concurrent callers missing the cache on the same key would otherwise
//! both reach the upstream API. The flight map elects the first caller as
//! leader; followers block on the leader's result and share it.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Instant;

use manse_tables::CalendarRecord;

use crate::error::ResolveError;
use crate::request::ResolutionRequest;

pub(crate) struct Flight {
    result: Mutex<Option<Result<CalendarRecord, ResolveError>>>,
    ready: Condvar,
}

pub(crate) enum FlightRole {
    /// This caller performs the resolution and must call
    /// [`FlightMap::complete`].
    Leader(Arc<Flight>),
    /// Another caller is already resolving this key.
    Follower(Arc<Flight>),
}

#[derive(Default)]
pub(crate) struct FlightMap {
    inner: Mutex<HashMap<ResolutionRequest, Arc<Flight>>>,
}

impl FlightMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Joins the flight for `request`, electing this caller leader if none
    /// is in progress.
    pub(crate) fn join(&self, request: ResolutionRequest) -> FlightRole {
        let mut inner = self.lock();
        if let Some(flight) = inner.get(&request) {
            return FlightRole::Follower(Arc::clone(flight));
        }
        let flight = Arc::new(Flight {
            result: Mutex::new(None),
            ready: Condvar::new(),
        });
        inner.insert(request, Arc::clone(&flight));
        FlightRole::Leader(flight)
    }

    /// Publishes the leader's result and wakes all followers. The key is
    /// retired so later callers start a fresh resolution (normally they hit
    /// the response cache instead).
    pub(crate) fn complete(
        &self,
        request: &ResolutionRequest,
        flight: &Flight,
        result: Result<CalendarRecord, ResolveError>,
    ) {
        {
            let mut slot = flight
                .result
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            *slot = Some(result);
        }
        flight.ready.notify_all();
        self.lock().remove(request);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ResolutionRequest, Arc<Flight>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Flight {
    /// Blocks until the leader publishes, or until `deadline` if one is
    /// given.
    pub(crate) fn wait(
        &self,
        deadline: Option<Instant>,
    ) -> Result<CalendarRecord, ResolveError> {
        let mut slot = self.result.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(result) = slot.as_ref() {
                return result.clone();
            }
            match deadline {
                None => {
                    slot = self.ready.wait(slot).unwrap_or_else(|e| e.into_inner());
                }
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(ResolveError::DeadlineExceeded);
                    }
                    let (guard, _timeout) = self
                        .ready
                        .wait_timeout(slot, deadline - now)
                        .unwrap_or_else(|e| e.into_inner());
                    slot = guard;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manse_tables::{LunarDate, SolarDate};
    use std::thread;
    use std::time::Duration;

    fn request() -> ResolutionRequest {
        ResolutionRequest::SolarToLunar(SolarDate::new(2024, 1, 1).unwrap())
    }

    fn record() -> CalendarRecord {
        CalendarRecord {
            solar: SolarDate::new(2024, 1, 1).unwrap(),
            lunar: LunarDate::new(2023, 11, 20, false).unwrap(),
        }
    }

    #[test]
    fn first_joiner_leads_second_follows() {
        let map = FlightMap::new();
        let FlightRole::Leader(leader) = map.join(request()) else {
            panic!("first join must lead");
        };
        let FlightRole::Follower(_) = map.join(request()) else {
            panic!("second join must follow");
        };
        map.complete(&request(), &leader, Ok(record()));
        // after completion the key is retired
        assert!(matches!(map.join(request()), FlightRole::Leader(_)));
    }

    #[test]
    fn followers_receive_the_leaders_result() {
        let map = Arc::new(FlightMap::new());
        let FlightRole::Leader(leader) = map.join(request()) else {
            panic!("first join must lead");
        };
        let FlightRole::Follower(follower) = map.join(request()) else {
            panic!("second join must follow");
        };

        let waiter = thread::spawn(move || follower.wait(None));
        thread::sleep(Duration::from_millis(20));
        map.complete(&request(), &leader, Ok(record()));
        assert_eq!(waiter.join().unwrap().unwrap(), record());
    }

    #[test]
    fn waiting_respects_the_deadline() {
        let map = FlightMap::new();
        let FlightRole::Leader(_leader) = map.join(request()) else {
            panic!("first join must lead");
        };
        let FlightRole::Follower(follower) = map.join(request()) else {
            panic!("second join must follow");
        };
        // leader never completes
        let deadline = Instant::now() + Duration::from_millis(30);
        assert_eq!(
            follower.wait(Some(deadline)).unwrap_err(),
            ResolveError::DeadlineExceeded
        );
    }
}
