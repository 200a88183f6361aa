//! Apparent solar longitude from a truncated periodic series.

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

/// Computes the sun's apparent ecliptic longitude in degrees for a Julian
/// Day, in `[0, 360)`.
///
/// Uses Julian centuries since J2000, the mean longitude, the mean anomaly,
/// and a three-term equation-of-center correction. Design tolerance is about
/// ±2 angular minutes against high-precision ephemerides, which translates to
/// roughly a minute of civil time at the sun's mean daily motion.
pub fn apparent_solar_longitude(jd: f64) -> f64 {
    // Julian centuries since J2000.0.
    let t = (jd - 2_451_545.0) / 36_525.0;

    // Geometric mean longitude and mean anomaly of the sun.
    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let mean_anomaly = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;

    let m = mean_anomaly.to_radians();
    let equation_of_center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    normalize_degrees(mean_longitude + equation_of_center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative() {
        assert_eq!(normalize_degrees(-15.0), 345.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }

    #[test]
    fn longitude_at_j2000() {
        // Early January: the sun sits near 280° of ecliptic longitude.
        let lon = apparent_solar_longitude(2_451_545.0);
        assert!(
            (lon - 280.382_158_5).abs() < 1e-6,
            "longitude at J2000 was {lon}"
        );
    }

    #[test]
    fn longitude_is_in_range_across_three_centuries() {
        // One sample per ~37 days over 1900–2200.
        let start = 2_415_020.5; // 1900-01-01
        for k in 0..3000 {
            let jd = start + k as f64 * 36.625;
            let lon = apparent_solar_longitude(jd);
            assert!(
                (0.0..360.0).contains(&lon),
                "longitude out of range at jd {jd}: {lon}"
            );
        }
    }

    #[test]
    fn longitude_advances_about_one_degree_per_day() {
        let jd = 2_460_310.5; // 2024-01-01
        let a = apparent_solar_longitude(jd);
        let b = apparent_solar_longitude(jd + 1.0);
        let delta = normalize_degrees(b - a);
        assert!(
            (0.95..1.05).contains(&delta),
            "daily motion was {delta} degrees"
        );
    }
}
