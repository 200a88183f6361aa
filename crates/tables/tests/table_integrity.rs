use manse_astro::to_julian_day;
use manse_tables::{LocalStore, SolarDate};

fn noon_jdn(date: SolarDate) -> i64 {
    to_julian_day(date.year(), date.month() as i32, date.day() as i32, 12.0) as i64
}

#[test]
fn every_record_satisfies_the_structural_invariants() {
    let store = LocalStore::new();
    for year in 1900..=2200 {
        let record = store.lunar_year(year).unwrap();
        let lengths = record.month_lengths();

        assert!(
            lengths.iter().all(|&l| l == 29 || l == 30),
            "{year}: month length outside 29/30"
        );
        let has_leap = record.leap_month() != 0;
        assert_eq!(
            lengths.len(),
            if has_leap { 13 } else { 12 },
            "{year}: month count does not match leap flag"
        );
        if has_leap {
            assert!(
                (1..=12).contains(&record.leap_month()),
                "{year}: leap month {} out of range",
                record.leap_month()
            );
        }

        let sum: u16 = lengths.iter().map(|&l| l as u16).sum();
        assert_eq!(record.total_days(), sum, "{year}: total_days mismatch");
        assert!(
            (354..=385).contains(&record.total_days()),
            "{year}: implausible year length {}",
            record.total_days()
        );

        // Lunar new year falls between Jan 21 and Feb 20.
        let ny = record.new_year();
        assert_eq!(ny.year(), year);
        let in_window = match ny.month() {
            1 => ny.day() >= 21,
            2 => ny.day() <= 20,
            _ => false,
        };
        assert!(in_window, "{year}: new year {ny} outside the Jan 21–Feb 20 window");
    }
}

#[test]
fn consecutive_new_years_are_exactly_one_lunar_year_apart() {
    let store = LocalStore::new();
    let mut prev = store.lunar_year(1900).unwrap();
    for year in 1901..=2200 {
        let record = store.lunar_year(year).unwrap();
        assert_eq!(
            noon_jdn(prev.new_year()) + prev.total_days() as i64,
            noon_jdn(record.new_year()),
            "chain broken between {} and {year}",
            year - 1
        );
        prev = record;
    }
}

#[test]
fn leap_years_follow_a_roughly_metonic_cadence() {
    let store = LocalStore::new();
    let leap_count = (1900..=2200)
        .filter(|&y| store.lunar_year(y).unwrap().leap_month() != 0)
        .count();
    // ~7 leap years per 19: 301 years gives about 111.
    assert!(
        (100..=125).contains(&leap_count),
        "implausible leap-year count {leap_count}"
    );
}
