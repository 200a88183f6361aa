//! Validated date types and the lunisolar record structs.

use std::fmt;

use manse_astro::{CivilDateTime, KST_UTC_OFFSET_DAYS, SolarTerm, from_julian_day,
    unix_millis_to_julian_day};

use crate::error::TableError;

/// A Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolarDate {
    year: i32,
    month: u8,
    day: u8,
}

pub(crate) fn days_in_solar_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

impl SolarDate {
    /// Creates a validated Gregorian date.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the month is outside 1..=12 or the day does
    /// not exist in that month.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, TableError> {
        if !(1..=12).contains(&month) {
            return Err(TableError::InvalidMonth { month });
        }
        let max_day = days_in_solar_month(year, month);
        if day == 0 || day > max_day {
            return Err(TableError::InvalidDay {
                year,
                month,
                day,
                max_day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Constructs from parts known to be valid (table data, Julian Day
    /// decompositions).
    pub(crate) fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    /// Julian day number at noon, as an integer day count.
    pub(crate) fn jdn(self) -> i64 {
        manse_astro::to_julian_day(self.year, self.month as i32, self.day as i32, 12.0) as i64
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A lunisolar calendar date. `is_leap_month` selects the intercalary month
/// when the year has one with the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    year: i32,
    month: u8,
    day: u8,
    is_leap_month: bool,
}

impl LunarDate {
    /// Creates a lunar date with structurally valid fields.
    ///
    /// Whether the month/day actually exists in the addressed year is only
    /// known to the year record and is checked during conversion.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the month is outside 1..=12 or the day is
    /// outside 1..=30.
    pub fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Result<Self, TableError> {
        if !(1..=12).contains(&month) {
            return Err(TableError::InvalidMonth { month });
        }
        if day == 0 || day > 30 {
            return Err(TableError::InvalidDay {
                year,
                month,
                day,
                max_day: 30,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            is_leap_month,
        })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn is_leap_month(self) -> bool {
        self.is_leap_month
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{}{:02}-{:02}",
            self.year,
            if self.is_leap_month { "L" } else { "" },
            self.month,
            self.day
        )
    }
}

/// A solar date paired with its lunisolar equivalent, as produced by a
/// completed resolution (remote or local).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRecord {
    pub solar: SolarDate,
    pub lunar: LunarDate,
}

impl fmt::Display for CalendarRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solar {} = lunar {}", self.solar, self.lunar)
    }
}

/// One month in a lunar year's stored sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarMonth {
    /// Month number (1..=12); a leap month repeats its host's number.
    pub number: u8,
    pub is_leap: bool,
    /// Length in days (29 or 30).
    pub length: u8,
}

/// One lunar year as decoded from the static table. Never mutated at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarYearRecord {
    year: i32,
    /// 0 when the year has no leap month, else the leap month's number.
    leap_month: u8,
    /// 12 or 13 values in sequence order, each 29 or 30.
    month_lengths: Vec<u8>,
    total_days: u16,
    /// Solar date of lunar new year's day.
    new_year: SolarDate,
}

impl LunarYearRecord {
    pub(crate) fn new(
        year: i32,
        leap_month: u8,
        month_lengths: Vec<u8>,
        new_year: SolarDate,
    ) -> Self {
        let total_days = month_lengths.iter().map(|&l| l as u16).sum();
        Self {
            year,
            leap_month,
            month_lengths,
            total_days,
            new_year,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn leap_month(&self) -> u8 {
        self.leap_month
    }

    pub fn month_lengths(&self) -> &[u8] {
        &self.month_lengths
    }

    pub fn total_days(&self) -> u16 {
        self.total_days
    }

    pub fn new_year(&self) -> SolarDate {
        self.new_year
    }

    /// Months in sequence order, with the leap month following its host.
    pub fn months(&self) -> impl Iterator<Item = LunarMonth> + '_ {
        let leap = self.leap_month;
        self.month_lengths
            .iter()
            .enumerate()
            .map(move |(idx, &length)| {
                let idx = idx as u8;
                let (number, is_leap) = if leap == 0 || idx < leap {
                    (idx + 1, false)
                } else if idx == leap {
                    (leap, true)
                } else {
                    (idx, false)
                };
                LunarMonth {
                    number,
                    is_leap,
                    length,
                }
            })
    }

    /// Length of the addressed month, if the year has it.
    pub fn month_length(&self, month: u8, is_leap: bool) -> Option<u8> {
        self.months()
            .find(|m| m.number == month && m.is_leap == is_leap)
            .map(|m| m.length)
    }

    /// Days from lunar new year's day to the first day of the addressed
    /// month, if the year has it.
    pub fn days_before_month(&self, month: u8, is_leap: bool) -> Option<u16> {
        let mut offset = 0u16;
        for m in self.months() {
            if m.number == month && m.is_leap == is_leap {
                return Some(offset);
            }
            offset += m.length as u16;
        }
        None
    }
}

/// One solar-term instant. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolarTermRecord {
    /// Civil year the instant falls in.
    pub year: i32,
    pub term: SolarTerm,
    /// UTC instant as milliseconds since the Unix epoch.
    pub timestamp_utc_millis: i64,
    /// Target ecliptic longitude (multiple of 15, 0..=345).
    pub longitude_degrees: u16,
}

impl SolarTermRecord {
    /// The instant in fixed +9 h (KST) civil time.
    pub fn local_civil(&self) -> CivilDateTime {
        let jd = unix_millis_to_julian_day(self.timestamp_utc_millis);
        from_julian_day(jd + KST_UTC_OFFSET_DAYS)
    }
}
