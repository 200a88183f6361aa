//! Range-validated access to the sharded tables and chronological term
//! scans.

use std::sync::OnceLock;

use manse_astro::term::ALL_TERMS;
use manse_astro::{SolarTerm, SolarTermSolver, julian_day_to_unix_millis};
use tracing::debug;

use crate::error::TableError;
use crate::records::{LunarYearRecord, SolarTermRecord};
use crate::shard::{SHARDS, shard_for};

/// Solar-term table for one shard's year range, filled from the solver on
/// first access and immutable afterwards.
struct TermShard {
    first_year: i32,
    last_year: i32,
    records: OnceLock<Vec<SolarTermRecord>>,
}

impl TermShard {
    fn records(&self, solver: &SolarTermSolver) -> &[SolarTermRecord] {
        self.records.get_or_init(|| {
            let mut records =
                Vec::with_capacity(((self.last_year - self.first_year + 1) * 24) as usize);
            for year in self.first_year..=self.last_year {
                for term in ALL_TERMS {
                    // The winter solstice of year y belongs to the solver's
                    // term cycle ending in y + 1.
                    let cycle_year = if term == SolarTerm::WinterSolstice {
                        year + 1
                    } else {
                        year
                    };
                    let longitude = term.longitude_degrees();
                    let solution = solver.solve(cycle_year, longitude as f64);
                    records.push(SolarTermRecord {
                        year,
                        term,
                        timestamp_utc_millis: julian_day_to_unix_millis(solution.julian_day),
                        longitude_degrees: longitude,
                    });
                }
            }
            debug!(
                first_year = self.first_year,
                last_year = self.last_year,
                count = records.len(),
                "materialized solar-term shard"
            );
            records
        })
    }
}

/// The local fallback store: lunar-year and solar-term records for a
/// contiguous supported year range, read-only once constructed.
///
/// Every entry point validates the requested year against the supported
/// range. Internally each lookup dispatches to the shard whose boundary
/// contains the year; the convenience scans walk shards in chronological
/// order, relying on record timestamps increasing within and across shards.
pub struct LocalStore {
    min_year: i32,
    max_year: i32,
    solver: SolarTermSolver,
    term_shards: Vec<TermShard>,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStore {
    /// Store over the full data range (1900–2200).
    pub fn new() -> Self {
        let term_shards = SHARDS
            .iter()
            .map(|shard| TermShard {
                first_year: shard.first_year,
                last_year: shard.last_year,
                records: OnceLock::new(),
            })
            .collect();
        Self {
            min_year: SHARDS[0].first_year,
            max_year: SHARDS[SHARDS.len() - 1].last_year,
            solver: SolarTermSolver::new(),
            term_shards,
        }
    }

    /// Store narrowed to `min_year..=max_year`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::YearOutOfRange`] when a bound leaves the data
    /// coverage or the bounds are inverted.
    pub fn with_year_range(min_year: i32, max_year: i32) -> Result<Self, TableError> {
        let data_min = SHARDS[0].first_year;
        let data_max = SHARDS[SHARDS.len() - 1].last_year;
        for bound in [min_year, max_year] {
            if bound < data_min || bound > data_max {
                return Err(TableError::YearOutOfRange {
                    year: bound,
                    min: data_min,
                    max: data_max,
                });
            }
        }
        if min_year > max_year {
            return Err(TableError::YearOutOfRange {
                year: max_year,
                min: min_year,
                max: data_max,
            });
        }
        Ok(Self {
            min_year,
            max_year,
            ..Self::new()
        })
    }

    /// Lower bound of the supported range.
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// Upper bound of the supported range.
    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// Whether `year` is within the supported range.
    pub fn contains_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    fn check_range(&self, year: i32) -> Result<(), TableError> {
        if self.contains_year(year) {
            Ok(())
        } else {
            Err(TableError::YearOutOfRange {
                year,
                min: self.min_year,
                max: self.max_year,
            })
        }
    }

    /// Decoded lunar-year record for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::YearOutOfRange`] outside the supported range.
    pub fn lunar_year(&self, year: i32) -> Result<LunarYearRecord, TableError> {
        self.check_range(year)?;
        let shard = shard_for(year).expect("supported range is covered by shards");
        Ok(shard.decode(year))
    }

    /// Record for one solar term of a civil year.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::YearOutOfRange`] outside the supported range.
    pub fn solar_term(&self, year: i32, term: SolarTerm) -> Result<SolarTermRecord, TableError> {
        self.check_range(year)?;
        let shard = self
            .term_shards
            .iter()
            .find(|s| (s.first_year..=s.last_year).contains(&year))
            .expect("supported range is covered by shards");
        let records = shard.records(&self.solver);
        let index = ((year - shard.first_year) as usize) * 24 + term.index();
        Ok(records[index])
    }

    /// All 24 term records of a civil year, ordered by timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::YearOutOfRange`] outside the supported range.
    pub fn year_solar_terms(&self, year: i32) -> Result<Vec<SolarTermRecord>, TableError> {
        self.check_range(year)?;
        let shard = self
            .term_shards
            .iter()
            .find(|s| (s.first_year..=s.last_year).contains(&year))
            .expect("supported range is covered by shards");
        let records = shard.records(&self.solver);
        let start = ((year - shard.first_year) as usize) * 24;
        Ok(records[start..start + 24].to_vec())
    }

    /// First term record strictly after `millis`, scanning shards forward.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TimestampOutsideSpan`] past the last covered
    /// term.
    pub fn next_term_after(&self, millis: i64) -> Result<SolarTermRecord, TableError> {
        for shard in &self.term_shards {
            if shard.last_year < self.min_year || shard.first_year > self.max_year {
                continue;
            }
            let records = shard.records(&self.solver);
            if let Some(last) = records.last() {
                if last.timestamp_utc_millis <= millis {
                    continue;
                }
            }
            if let Some(record) = records.iter().find(|r| {
                r.timestamp_utc_millis > millis && self.contains_year(r.year)
            }) {
                return Ok(*record);
            }
        }
        Err(TableError::TimestampOutsideSpan { millis })
    }

    /// Last term record at or before `millis`, scanning shards backward.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TimestampOutsideSpan`] before the first covered
    /// term.
    pub fn nearest_term_before(&self, millis: i64) -> Result<SolarTermRecord, TableError> {
        for shard in self.term_shards.iter().rev() {
            if shard.last_year < self.min_year || shard.first_year > self.max_year {
                continue;
            }
            let records = shard.records(&self.solver);
            if let Some(first) = records.first() {
                if first.timestamp_utc_millis > millis {
                    continue;
                }
            }
            if let Some(record) = records.iter().rev().find(|r| {
                r.timestamp_utc_millis <= millis && self.contains_year(r.year)
            }) {
                return Ok(*record);
            }
        }
        Err(TableError::TimestampOutsideSpan { millis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_years_succeed_and_neighbors_fail() {
        let store = LocalStore::new();
        assert!(store.lunar_year(1900).is_ok());
        assert!(store.lunar_year(2200).is_ok());
        assert_eq!(
            store.lunar_year(1899).unwrap_err(),
            TableError::YearOutOfRange {
                year: 1899,
                min: 1900,
                max: 2200,
            }
        );
        assert_eq!(
            store.lunar_year(2201).unwrap_err(),
            TableError::YearOutOfRange {
                year: 2201,
                min: 1900,
                max: 2200,
            }
        );
    }

    #[test]
    fn narrowed_range_is_enforced() {
        let store = LocalStore::with_year_range(2000, 2100).unwrap();
        assert!(store.lunar_year(2000).is_ok());
        assert!(store.lunar_year(1999).is_err());
        assert!(store.solar_term(2101, SolarTerm::MinorCold).is_err());
        assert!(!store.contains_year(1950));
    }

    #[test]
    fn invalid_narrowing_is_rejected() {
        assert!(LocalStore::with_year_range(1800, 2000).is_err());
        assert!(LocalStore::with_year_range(2000, 2300).is_err());
        assert!(LocalStore::with_year_range(2100, 2000).is_err());
    }

    #[test]
    fn known_term_instant() {
        let store = LocalStore::new();
        let record = store.solar_term(2024, SolarTerm::StartOfSpring).unwrap();
        assert_eq!(record.longitude_degrees, 315);
        let local = record.local_civil();
        assert_eq!(
            (local.year, local.month, local.day, local.hour, local.minute),
            (2024, 2, 4, 17, 11)
        );
    }

    #[test]
    fn year_terms_are_increasing_and_cyclic() {
        let store = LocalStore::new();
        for year in [1900, 1975, 1976, 2024, 2200] {
            let records = store.year_solar_terms(year).unwrap();
            assert_eq!(records.len(), 24);
            for pair in records.windows(2) {
                assert!(
                    pair[0].timestamp_utc_millis < pair[1].timestamp_utc_millis,
                    "{year}: {} not before {}",
                    pair[0].term,
                    pair[1].term
                );
                assert_eq!(
                    (pair[0].longitude_degrees + 15) % 360,
                    pair[1].longitude_degrees,
                    "{year}: longitude step broken at {}",
                    pair[1].term
                );
            }
            assert!(records.iter().all(|r| r.year == year));
        }
    }

    #[test]
    fn next_and_nearest_scans() {
        let store = LocalStore::new();
        let terms = store.year_solar_terms(2024).unwrap();
        let spring = terms[SolarTerm::StartOfSpring.index()];

        let next = store
            .next_term_after(spring.timestamp_utc_millis)
            .unwrap();
        assert_eq!(next.term, SolarTerm::RainWater);
        assert_eq!(next.year, 2024);

        // At the exact instant, the nearest term not yet exceeded is itself.
        let nearest = store
            .nearest_term_before(spring.timestamp_utc_millis)
            .unwrap();
        assert_eq!(nearest.term, SolarTerm::StartOfSpring);

        let before = store
            .nearest_term_before(spring.timestamp_utc_millis - 1)
            .unwrap();
        assert_eq!(before.term, SolarTerm::MajorCold);
    }

    #[test]
    fn scans_cross_the_shard_boundary() {
        let store = LocalStore::new();
        let solstice_1975 = store
            .solar_term(1975, SolarTerm::WinterSolstice)
            .unwrap();
        let next = store
            .next_term_after(solstice_1975.timestamp_utc_millis)
            .unwrap();
        // The following term lives in the next shard.
        assert_eq!((next.year, next.term), (1976, SolarTerm::MinorCold));
    }

    #[test]
    fn scans_outside_the_span_fail() {
        let store = LocalStore::new();
        // Far beyond 2200.
        let far_future = 10_000_000_000_000i64.saturating_mul(2);
        assert!(matches!(
            store.next_term_after(far_future),
            Err(TableError::TimestampOutsideSpan { .. })
        ));
        // Far before 1900.
        let far_past = -10_000_000_000_000i64;
        assert!(matches!(
            store.nearest_term_before(far_past),
            Err(TableError::TimestampOutsideSpan { .. })
        ));
    }
}
