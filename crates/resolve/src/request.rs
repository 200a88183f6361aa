//! Resolution requests, which double as cache keys.

use std::fmt;

use manse_tables::{LunarDate, SolarDate};

/// One conversion request: a date plus the direction to convert in.
///
/// The variant, date fields, and leap-month flag together form the composite
/// cache key for response memoization and request coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionRequest {
    /// Find the lunisolar equivalent of a solar date.
    SolarToLunar(SolarDate),
    /// Find the solar equivalent of a lunisolar date.
    LunarToSolar(LunarDate),
}

impl ResolutionRequest {
    /// The year whose record governs the fallback range check.
    pub fn year(&self) -> i32 {
        match self {
            Self::SolarToLunar(date) => date.year(),
            Self::LunarToSolar(date) => date.year(),
        }
    }
}

impl fmt::Display for ResolutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolarToLunar(date) => write!(f, "solar->lunar {date}"),
            Self::LunarToSolar(date) => write!(f, "lunar->solar {date}"),
        }
    }
}
