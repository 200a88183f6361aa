//! Error types for the manse-tables crate.

/// Error type for all fallible operations in the manse-tables crate.
///
/// Range violations are fatal and never recovered; the remaining variants
/// report dates that do not exist in the addressed calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Returned when a year lies outside the supported table range.
    #[error("year {year} outside supported range {min}..={max}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Lower bound of the supported range.
        min: i32,
        /// Upper bound of the supported range.
        max: i32,
    },

    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u8 },

    /// Returned when a day does not exist in the given solar month.
    #[error("invalid day: {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        year: i32,
        month: u8,
        day: u8,
        max_day: u8,
    },

    /// Returned when a lunar year has no month with the requested
    /// number/leap combination.
    #[error("lunar year {year} has no month {month} (leap: {is_leap})")]
    NoSuchLunarMonth { year: i32, month: u8, is_leap: bool },

    /// Returned when a lunar month is shorter than the requested day.
    #[error("lunar {year}-{month:02} (leap: {is_leap}) has {length} days, not {day}")]
    NoSuchLunarDay {
        year: i32,
        month: u8,
        is_leap: bool,
        day: u8,
        length: u8,
    },

    /// Returned by the chronological term scans when a timestamp falls
    /// outside the span covered by the tables.
    #[error("timestamp {millis} ms outside the covered solar-term span")]
    TimestampOutsideSpan { millis: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_message() {
        let err = TableError::YearOutOfRange {
            year: 1899,
            min: 1900,
            max: 2200,
        };
        assert_eq!(
            err.to_string(),
            "year 1899 outside supported range 1900..=2200"
        );
    }

    #[test]
    fn lunar_day_message() {
        let err = TableError::NoSuchLunarDay {
            year: 2023,
            month: 2,
            is_leap: true,
            day: 30,
            length: 29,
        };
        assert_eq!(
            err.to_string(),
            "lunar 2023-02 (leap: true) has 29 days, not 30"
        );
    }

    #[test]
    fn error_is_send_sync_and_clone() {
        fn assert_impl<T: std::error::Error + Send + Sync + Clone>() {}
        assert_impl::<TableError>();
    }
}
