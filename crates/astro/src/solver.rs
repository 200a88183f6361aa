//! Newton-style fixed-point iteration for solar-term instants.

use tracing::warn;

use crate::julian::to_julian_day;
use crate::longitude::apparent_solar_longitude;

/// Upper bound on solver iterations.
const MAX_ITERATIONS: u32 = 10;

/// Convergence threshold on the angular difference, in degrees.
const CONVERGENCE_EPSILON_DEG: f64 = 1e-5;

/// The sun's mean daily motion in degrees, used as the Newton step scale.
const MEAN_DAILY_MOTION_DEG: f64 = 0.9856;

/// Result of a solar-term solve.
///
/// The Julian Day is always the best available estimate; `converged` reports
/// whether the angular difference fell below the precision target before the
/// iteration cap. Callers that need a guaranteed-precise instant should check
/// the flag; the value itself is still within a fraction of a day otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermSolution {
    /// Julian Day of the instant the sun reaches the target longitude.
    pub julian_day: f64,
    /// Whether the convergence threshold was met.
    pub converged: bool,
    /// Number of iterations performed.
    pub iterations: u32,
}

/// Iterative solver locating the instant the sun reaches a target ecliptic
/// longitude near a given year.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarTermSolver;

impl SolarTermSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves for the Julian Day at which the sun's apparent longitude equals
    /// `target_longitude_deg` (degrees, `[0,360)`), near the winter-to-winter
    /// term cycle that ends in `year`.
    ///
    /// Targets in `[270, 360)` belong to the December–February stretch and
    /// seed from the previous calendar year, so e.g. 285° for `year` resolves
    /// to the Minor Cold of early January of `year`.
    pub fn solve(&self, year: i32, target_longitude_deg: f64) -> TermSolution {
        // Coarse month estimate: two terms per month, anchored so that 0°
        // (vernal equinox) lands in March.
        let month_estimate = (target_longitude_deg / 30.0).floor() as i32 + 3;
        let seed_year = if target_longitude_deg >= 270.0 {
            year - 1
        } else {
            year
        };
        let mut jd = to_julian_day(seed_year, month_estimate, 15, 12.0);

        let mut converged = false;
        let mut iterations = 0;
        for _ in 0..MAX_ITERATIONS {
            iterations += 1;
            let longitude = apparent_solar_longitude(jd);
            let mut difference = target_longitude_deg - longitude;
            // Keep the angular difference in (-180, 180] across the 0°/360°
            // wraparound.
            while difference > 180.0 {
                difference -= 360.0;
            }
            while difference <= -180.0 {
                difference += 360.0;
            }
            if difference.abs() < CONVERGENCE_EPSILON_DEG {
                converged = true;
                break;
            }
            jd += difference / MEAN_DAILY_MOTION_DEG;
        }

        if !converged {
            warn!(
                year,
                target_longitude_deg,
                iterations,
                "solar-term solver exhausted iterations without converging; \
                 returning best-effort estimate"
            );
        }

        TermSolution {
            julian_day: jd,
            converged,
            iterations,
        }
    }
}
