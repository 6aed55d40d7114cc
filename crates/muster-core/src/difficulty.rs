//! Keystone difficulty band.

use serde::{Deserialize, Serialize};

use crate::error::BandParseError;

/// Lower bound of the open-ended top bracket.
const OPEN_BRACKET_LOWER: u8 = 21;
/// Implied upper bound when a channel advertises the top bracket.
const OPEN_BRACKET_UPPER: u8 = 30;

/// Inclusive band of keystone levels a session may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBand {
    lower: u8,
    upper: u8,
}

impl DifficultyBand {
    /// Build a band; the lower bound must not exceed the upper bound.
    pub fn new(lower: u8, upper: u8) -> Result<Self, BandParseError> {
        if lower > upper {
            return Err(BandParseError::Inverted { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Derive the band from a listing-channel name such as `lfg-m2-m10`.
    ///
    /// The second dash-separated segment carries the lower bound, the third
    /// the upper; a lower bound of 21 advertises the open-ended top bracket
    /// and implies an upper bound of 30.
    pub fn from_channel_name(name: &str) -> Result<Self, BandParseError> {
        let parts: Vec<&str> = name.split('-').collect();
        let lower_segment = parts
            .get(1)
            .ok_or_else(|| BandParseError::NoBand(name.to_string()))?;
        let lower = parse_level(lower_segment)?;

        let upper = if lower == OPEN_BRACKET_LOWER {
            OPEN_BRACKET_UPPER
        } else {
            let upper_segment = parts
                .get(2)
                .ok_or_else(|| BandParseError::NoBand(name.to_string()))?;
            parse_level(upper_segment)?
        };

        Self::new(lower, upper)
    }

    /// Band lower bound.
    pub fn lower(&self) -> u8 {
        self.lower
    }

    /// Band upper bound.
    pub fn upper(&self) -> u8 {
        self.upper
    }

    /// Whether a level lies within the band.
    pub fn contains(&self, level: u8) -> bool {
        (self.lower..=self.upper).contains(&level)
    }

    /// Every level in the band, in ascending order (drives the `+2, +3, …`
    /// selection menu).
    pub fn levels(&self) -> std::ops::RangeInclusive<u8> {
        self.lower..=self.upper
    }
}

fn parse_level(segment: &str) -> Result<u8, BandParseError> {
    segment
        .strip_prefix('m')
        .unwrap_or(segment)
        .parse()
        .map_err(|_| BandParseError::BadSegment(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_segment_band() {
        let band = DifficultyBand::from_channel_name("lfg-m2-m10").expect("band parses");
        assert_eq!(band.lower(), 2);
        assert_eq!(band.upper(), 10);
        assert_eq!(band.levels().count(), 9);
    }

    #[test]
    fn top_bracket_implies_upper_bound() {
        let band = DifficultyBand::from_channel_name("lfg-m21").expect("band parses");
        assert_eq!(band.lower(), 21);
        assert_eq!(band.upper(), 30);
    }

    #[test]
    fn contains_is_inclusive() {
        let band = DifficultyBand::new(2, 10).expect("band is valid");
        assert!(band.contains(2));
        assert!(band.contains(10));
        assert!(!band.contains(1));
        assert!(!band.contains(11));
    }

    #[test]
    fn malformed_names_are_errors() {
        assert_eq!(
            DifficultyBand::from_channel_name("lfg"),
            Err(BandParseError::NoBand("lfg".to_string()))
        );
        assert_eq!(
            DifficultyBand::from_channel_name("lfg-keys-go"),
            Err(BandParseError::BadSegment("keys".to_string()))
        );
        assert_eq!(
            DifficultyBand::from_channel_name("lfg-m2"),
            Err(BandParseError::NoBand("lfg-m2".to_string()))
        );
    }

    #[test]
    fn inverted_band_rejected() {
        assert_eq!(
            DifficultyBand::new(10, 2),
            Err(BandParseError::Inverted { lower: 10, upper: 2 })
        );
    }
}
