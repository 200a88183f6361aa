//! Date ⇄ Julian Day conversion.
//!
//! Both directions operate on the proleptic Gregorian calendar. The inverse
//! keeps the historical Julian-calendar branch below JD 2299161 so the
//! published formula stays numerically exact, even though every date in this
//! system's 1900–2200 operating range takes the Gregorian branch.

/// Civil date and time produced by [`from_julian_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilDateTime {
    /// Astronomical year number.
    pub year: i32,
    /// Month (1..=12).
    pub month: u8,
    /// Day of month (1..=31).
    pub day: u8,
    /// Hour of day (0..=23).
    pub hour: u8,
    /// Minute (0..=59), rounded to the nearest minute.
    pub minute: u8,
}

/// Converts a Gregorian calendar date to a Julian Day.
///
/// `hour` is a fractional hour of day; noon (`12.0`) yields an integral
/// Julian Day plus zero fraction. January and February are treated as months
/// 13 and 14 of the previous year, per the standard formula. Months beyond 12
/// are accepted and continue into the following year, which the solver's
/// coarse seeding relies on.
pub fn to_julian_day(year: i32, month: i32, day: i32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + b
        - 1524.5
        + hour / 24.0
}

/// Converts a Julian Day back to a civil date and time.
///
/// The result is rounded to the nearest minute. Julian Days below 2299161
/// take the Julian-calendar branch of the published inverse.
pub fn from_julian_day(jd: f64) -> CivilDateTime {
    // Round to the nearest minute up front so hour/minute extraction cannot
    // produce a 60th minute needing a carry across day boundaries.
    let jd = jd + 0.5 / 1440.0;

    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let a = if z >= 2_299_161.0 {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as i32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as i32;
    let year = if month > 2 {
        (c - 4716.0) as i32
    } else {
        (c - 4715.0) as i32
    };

    let hours = f * 24.0;
    let hour = hours.floor();
    let minute = ((hours - hour) * 60.0).floor();

    CivilDateTime {
        year,
        month: month as u8,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
    }
}

/// Milliseconds since the Unix epoch for a (UTC) Julian Day.
pub fn julian_day_to_unix_millis(jd: f64) -> i64 {
    ((jd - 2_440_587.5) * 86_400_000.0).round() as i64
}

/// Julian Day for a Unix-epoch millisecond timestamp.
pub fn unix_millis_to_julian_day(millis: i64) -> f64 {
    millis as f64 / 86_400_000.0 + 2_440_587.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_j2000() {
        let jd = to_julian_day(2000, 1, 1, 12.0);
        assert_eq!(jd, 2_451_545.0);
    }

    #[test]
    fn january_uses_previous_year_adjustment() {
        let jd = to_julian_day(1900, 1, 31, 0.0);
        assert_eq!(jd, 2_415_050.5);
    }

    #[test]
    fn inverse_of_epoch() {
        let civil = from_julian_day(2_451_545.0);
        assert_eq!(
            civil,
            CivilDateTime {
                year: 2000,
                month: 1,
                day: 1,
                hour: 12,
                minute: 0,
            }
        );
    }

    #[test]
    fn month_thirteen_continues_into_next_year() {
        // The solver seeds with month estimates beyond December; month 13 of
        // year y must equal month 1 of year y + 1.
        let a = to_julian_day(2023, 13, 15, 12.0);
        let b = to_julian_day(2024, 1, 15, 12.0);
        assert_eq!(a, b);
    }

    #[test]
    fn fractional_hour_roundtrip() {
        let jd = to_julian_day(1999, 2, 28, 6.5);
        let civil = from_julian_day(jd);
        assert_eq!((civil.hour, civil.minute), (6, 30));
    }

    #[test]
    fn leap_day_roundtrip() {
        let jd = to_julian_day(2024, 2, 29, 18.0);
        let civil = from_julian_day(jd);
        assert_eq!((civil.year, civil.month, civil.day), (2024, 2, 29));
        assert_eq!((civil.hour, civil.minute), (18, 0));
    }

    #[test]
    fn julian_branch_before_cutover() {
        // JD below 2299161 exercises the pre-Gregorian branch; 2299159.5 is
        // 1582-10-04 in the Julian calendar, the last day before the cutover.
        let civil = from_julian_day(2_299_159.5);
        assert_eq!((civil.year, civil.month, civil.day), (1582, 10, 4));
    }

    #[test]
    fn unix_millis_roundtrip() {
        let jd = to_julian_day(2024, 1, 1, 0.0);
        let millis = julian_day_to_unix_millis(jd);
        assert_eq!(millis, 1_704_067_200_000);
        let back = unix_millis_to_julian_day(millis);
        assert!((back - jd).abs() < 1e-9, "jd {jd} -> {millis} -> {back}");
    }
}
