//! # manse-astro
//!
//! Pure astronomical arithmetic for solar-term timing: Julian Day
//! conversions, the apparent solar longitude series, and the iterative
//! solar-term solver.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────────┐     ┌────────────────┐
//!  │  julian       │────▶│  longitude         │────▶│    solver      │
//!  │  (date ⇄ JD)  │     │  (λ☉ at a JD)      │     │  (JD for λ☉)   │
//!  └──────────────┘     └────────────────────┘     └────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use manse_astro::{SolarTerm, SolarTermSolver, from_julian_day};
//!
//! let solver = SolarTermSolver::new();
//! // Start of Spring 2024 (ecliptic longitude 315°)
//! let solution = solver.solve(2024, SolarTerm::StartOfSpring.longitude_degrees() as f64);
//! assert!(solution.converged);
//!
//! let kst = from_julian_day(solution.julian_day + manse_astro::KST_UTC_OFFSET_DAYS);
//! assert_eq!((kst.year, kst.month, kst.day), (2024, 2, 4));
//! ```

pub mod julian;
pub mod longitude;
pub mod solver;
pub mod term;

pub use julian::{
    CivilDateTime, from_julian_day, julian_day_to_unix_millis, to_julian_day,
    unix_millis_to_julian_day,
};
pub use longitude::{apparent_solar_longitude, normalize_degrees};
pub use solver::{SolarTermSolver, TermSolution};
pub use term::SolarTerm;

/// Fixed civil-time offset applied to UTC results for local (KST) presentation,
/// expressed in days for direct addition to a Julian Day.
pub const KST_UTC_OFFSET_DAYS: f64 = 9.0 / 24.0;
