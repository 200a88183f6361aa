//! The 24 solar terms and their target ecliptic longitudes.

use std::fmt;

/// One of the 24 fixed points of the sun's apparent ecliptic longitude,
/// spaced 15° apart, marking traditional East Asian seasonal boundaries.
///
/// Variants are listed in civil-year order, beginning with Minor Cold in
/// early January (longitude 285°) and ending with the Winter Solstice in
/// late December (270°).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarTerm {
    MinorCold,
    MajorCold,
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    VernalEquinox,
    ClearAndBright,
    GrainRain,
    StartOfSummer,
    GrainFull,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnalEquinox,
    ColdDew,
    FrostDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
}

/// All 24 terms in civil-year order.
pub const ALL_TERMS: [SolarTerm; 24] = [
    SolarTerm::MinorCold,
    SolarTerm::MajorCold,
    SolarTerm::StartOfSpring,
    SolarTerm::RainWater,
    SolarTerm::AwakeningOfInsects,
    SolarTerm::VernalEquinox,
    SolarTerm::ClearAndBright,
    SolarTerm::GrainRain,
    SolarTerm::StartOfSummer,
    SolarTerm::GrainFull,
    SolarTerm::GrainInEar,
    SolarTerm::SummerSolstice,
    SolarTerm::MinorHeat,
    SolarTerm::MajorHeat,
    SolarTerm::StartOfAutumn,
    SolarTerm::EndOfHeat,
    SolarTerm::WhiteDew,
    SolarTerm::AutumnalEquinox,
    SolarTerm::ColdDew,
    SolarTerm::FrostDescent,
    SolarTerm::StartOfWinter,
    SolarTerm::MinorSnow,
    SolarTerm::MajorSnow,
    SolarTerm::WinterSolstice,
];

impl SolarTerm {
    /// Position within the civil year (0 = Minor Cold .. 23 = Winter Solstice).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Term at a civil-year position.
    pub fn from_index(index: usize) -> Option<Self> {
        ALL_TERMS.get(index).copied()
    }

    /// Target ecliptic longitude in degrees (a multiple of 15 in 0..=345).
    ///
    /// Minor Cold sits at 285°; each following term adds 15°, wrapping at
    /// 360°.
    pub fn longitude_degrees(self) -> u16 {
        (285 + 15 * self.index() as u16) % 360
    }

    /// Term whose target longitude is `degrees`, if it is a multiple of 15.
    pub fn from_longitude(degrees: u16) -> Option<Self> {
        if degrees % 15 != 0 || degrees >= 360 {
            return None;
        }
        // invert (285 + 15*i) mod 360
        let index = ((degrees + 360 - 285) % 360) / 15;
        Self::from_index(index as usize)
    }

    /// English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::MinorCold => "Minor Cold",
            Self::MajorCold => "Major Cold",
            Self::StartOfSpring => "Start of Spring",
            Self::RainWater => "Rain Water",
            Self::AwakeningOfInsects => "Awakening of Insects",
            Self::VernalEquinox => "Vernal Equinox",
            Self::ClearAndBright => "Clear and Bright",
            Self::GrainRain => "Grain Rain",
            Self::StartOfSummer => "Start of Summer",
            Self::GrainFull => "Grain Full",
            Self::GrainInEar => "Grain in Ear",
            Self::SummerSolstice => "Summer Solstice",
            Self::MinorHeat => "Minor Heat",
            Self::MajorHeat => "Major Heat",
            Self::StartOfAutumn => "Start of Autumn",
            Self::EndOfHeat => "End of Heat",
            Self::WhiteDew => "White Dew",
            Self::AutumnalEquinox => "Autumnal Equinox",
            Self::ColdDew => "Cold Dew",
            Self::FrostDescent => "Frost Descent",
            Self::StartOfWinter => "Start of Winter",
            Self::MinorSnow => "Minor Snow",
            Self::MajorSnow => "Major Snow",
            Self::WinterSolstice => "Winter Solstice",
        }
    }

    /// Korean name (hangul).
    pub fn korean_name(self) -> &'static str {
        match self {
            Self::MinorCold => "소한",
            Self::MajorCold => "대한",
            Self::StartOfSpring => "입춘",
            Self::RainWater => "우수",
            Self::AwakeningOfInsects => "경칩",
            Self::VernalEquinox => "춘분",
            Self::ClearAndBright => "청명",
            Self::GrainRain => "곡우",
            Self::StartOfSummer => "입하",
            Self::GrainFull => "소만",
            Self::GrainInEar => "망종",
            Self::SummerSolstice => "하지",
            Self::MinorHeat => "소서",
            Self::MajorHeat => "대서",
            Self::StartOfAutumn => "입추",
            Self::EndOfHeat => "처서",
            Self::WhiteDew => "백로",
            Self::AutumnalEquinox => "추분",
            Self::ColdDew => "한로",
            Self::FrostDescent => "상강",
            Self::StartOfWinter => "입동",
            Self::MinorSnow => "소설",
            Self::MajorSnow => "대설",
            Self::WinterSolstice => "동지",
        }
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitudes_step_fifteen_degrees_cyclically() {
        for pair in ALL_TERMS.windows(2) {
            let a = pair[0].longitude_degrees();
            let b = pair[1].longitude_degrees();
            assert_eq!(
                (a + 15) % 360,
                b,
                "{} -> {} did not advance 15 degrees",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn first_and_last_terms() {
        assert_eq!(SolarTerm::MinorCold.longitude_degrees(), 285);
        assert_eq!(SolarTerm::WinterSolstice.longitude_degrees(), 270);
        assert_eq!(SolarTerm::VernalEquinox.longitude_degrees(), 0);
        assert_eq!(SolarTerm::StartOfSpring.longitude_degrees(), 315);
    }

    #[test]
    fn from_longitude_inverts_longitude_degrees() {
        for term in ALL_TERMS {
            assert_eq!(
                SolarTerm::from_longitude(term.longitude_degrees()),
                Some(term)
            );
        }
        assert_eq!(SolarTerm::from_longitude(7), None);
        assert_eq!(SolarTerm::from_longitude(360), None);
    }

    #[test]
    fn index_roundtrip() {
        for (i, term) in ALL_TERMS.iter().enumerate() {
            assert_eq!(term.index(), i);
            assert_eq!(SolarTerm::from_index(i), Some(*term));
        }
        assert_eq!(SolarTerm::from_index(24), None);
    }
}
