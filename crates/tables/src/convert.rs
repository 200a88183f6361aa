//! Solar ⇄ lunar conversion against the year table.
//!
//! Both directions work on day offsets from the lunar new year anchor of the
//! governing record, so a conversion touches at most two year records.

use manse_astro::from_julian_day;
use tracing::debug;

use crate::error::TableError;
use crate::records::{LunarDate, SolarDate};
use crate::store::LocalStore;

/// Converts a solar date to its lunisolar equivalent.
///
/// A solar date before the lunar new year of its civil year belongs to the
/// previous lunar year, so conversions in January/February may address the
/// preceding record.
///
/// # Errors
///
/// Returns [`TableError::YearOutOfRange`] when the governing lunar year is
/// not covered by the tables (including early days of the first supported
/// year, which belong to the year before it).
pub fn solar_to_lunar(store: &LocalStore, date: SolarDate) -> Result<LunarDate, TableError> {
    let record = {
        let same_year = store.lunar_year(date.year())?;
        if date < same_year.new_year() {
            store.lunar_year(date.year() - 1)?
        } else {
            same_year
        }
    };

    let mut offset = date.jdn() - record.new_year().jdn();
    debug_assert!(
        (0..record.total_days() as i64).contains(&offset),
        "offset {offset} outside lunar year {}",
        record.year()
    );

    for month in record.months() {
        if offset < month.length as i64 {
            let lunar = LunarDate::new(
                record.year(),
                month.number,
                offset as u8 + 1,
                month.is_leap,
            )?;
            debug!(%date, %lunar, "solar date resolved locally");
            return Ok(lunar);
        }
        offset -= month.length as i64;
    }

    // The chain invariant new_year(y) + total_days(y) == new_year(y+1)
    // guarantees the loop returns; reaching here means corrupt table data.
    Err(TableError::YearOutOfRange {
        year: record.year(),
        min: store.min_year(),
        max: store.max_year(),
    })
}

/// Converts a lunisolar date to its solar equivalent.
///
/// # Errors
///
/// Returns [`TableError::YearOutOfRange`] for uncovered years,
/// [`TableError::NoSuchLunarMonth`] when the year lacks the addressed
/// (month, leap) combination, and [`TableError::NoSuchLunarDay`] when the
/// month is shorter than the requested day.
pub fn lunar_to_solar(store: &LocalStore, date: LunarDate) -> Result<SolarDate, TableError> {
    let record = store.lunar_year(date.year())?;

    let Some(length) = record.month_length(date.month(), date.is_leap_month()) else {
        return Err(TableError::NoSuchLunarMonth {
            year: date.year(),
            month: date.month(),
            is_leap: date.is_leap_month(),
        });
    };
    if date.day() > length {
        return Err(TableError::NoSuchLunarDay {
            year: date.year(),
            month: date.month(),
            is_leap: date.is_leap_month(),
            day: date.day(),
            length,
        });
    }

    let before = record
        .days_before_month(date.month(), date.is_leap_month())
        .expect("month existence checked above");
    let jd = record.new_year().jdn() as f64 + before as f64 + (date.day() - 1) as f64;
    let civil = from_julian_day(jd);
    let solar = SolarDate::from_parts(civil.year, civil.month, civil.day);
    debug!(%date, %solar, "lunar date resolved locally");
    Ok(solar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    #[test]
    fn new_years_day_maps_to_first_lunar_day() {
        let store = LocalStore::new();
        let date = SolarDate::new(1900, 1, 31).unwrap();
        let lunar = solar_to_lunar(&store, date).unwrap();
        assert_eq!(lunar, LunarDate::new(1900, 1, 1, false).unwrap());
    }

    #[test]
    fn day_before_first_covered_new_year_is_out_of_range() {
        let store = LocalStore::new();
        let date = SolarDate::new(1900, 1, 30).unwrap();
        assert_eq!(
            solar_to_lunar(&store, date).unwrap_err(),
            TableError::YearOutOfRange {
                year: 1899,
                min: 1900,
                max: 2200,
            }
        );
    }

    #[test]
    fn january_2024_belongs_to_lunar_2023() {
        let store = LocalStore::new();
        let date = SolarDate::new(2024, 1, 1).unwrap();
        let lunar = solar_to_lunar(&store, date).unwrap();
        assert_eq!(lunar, LunarDate::new(2023, 11, 20, false).unwrap());
    }

    #[test]
    fn seollal_2024() {
        let store = LocalStore::new();
        let eve = SolarDate::new(2024, 2, 9).unwrap();
        let lunar = solar_to_lunar(&store, eve).unwrap();
        assert_eq!(lunar, LunarDate::new(2023, 12, 29, false).unwrap());

        let new_year = SolarDate::new(2024, 2, 10).unwrap();
        let lunar = solar_to_lunar(&store, new_year).unwrap();
        assert_eq!(lunar, LunarDate::new(2024, 1, 1, false).unwrap());
    }

    #[test]
    fn lunar_to_solar_inverts_known_dates() {
        let store = LocalStore::new();
        let lunar = LunarDate::new(2023, 11, 20, false).unwrap();
        let solar = lunar_to_solar(&store, lunar).unwrap();
        assert_eq!(solar, SolarDate::new(2024, 1, 1).unwrap());
    }

    #[test]
    fn leap_month_addressing() {
        let store = LocalStore::new();
        // 2023 has leap month 2 with 29 days.
        let leap_first = LunarDate::new(2023, 2, 1, true).unwrap();
        let solar = lunar_to_solar(&store, leap_first).unwrap();
        // month 1 (29) + month 2 (30) after Jan 22
        assert_eq!(solar, SolarDate::new(2023, 3, 22).unwrap());

        let missing = LunarDate::new(2023, 3, 1, true).unwrap();
        assert_eq!(
            lunar_to_solar(&store, missing).unwrap_err(),
            TableError::NoSuchLunarMonth {
                year: 2023,
                month: 3,
                is_leap: true,
            }
        );

        let too_long = LunarDate::new(2023, 2, 30, true).unwrap();
        assert_eq!(
            lunar_to_solar(&store, too_long).unwrap_err(),
            TableError::NoSuchLunarDay {
                year: 2023,
                month: 2,
                is_leap: true,
                day: 30,
                length: 29,
            }
        );
    }

    #[test]
    fn roundtrip_through_a_full_civil_year() {
        let store = LocalStore::new();
        for month in 1..=12u8 {
            for day in 1..=crate::records::days_in_solar_month(2024, month) {
                let date = SolarDate::new(2024, month, day).unwrap();
                let lunar = solar_to_lunar(&store, date).unwrap();
                let back = lunar_to_solar(&store, lunar).unwrap();
                assert_eq!(back, date, "roundtrip failed for {date} via {lunar}");
            }
        }
    }
}
