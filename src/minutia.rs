//! Minutia points, their crossing-number classes, and the class histogram.

use crate::util::RidgeprintError;
use std::fmt;

/// Crossing-number classification of a skeleton pixel.
///
/// The discriminant equals the crossing number and the serialized type code.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MinutiaKind {
    RidgeEnding = 1,
    ContinuingRidge = 2,
    Bifurcation = 3,
    Crossing = 4,
}

impl MinutiaKind {
    /// Returns the numeric type code (1..=4).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Maps a crossing number to its class; 0 and values above 4 are not minutiae.
    pub fn from_crossing_number(cn: u8) -> Option<Self> {
        match cn {
            1 => Some(Self::RidgeEnding),
            2 => Some(Self::ContinuingRidge),
            3 => Some(Self::Bifurcation),
            4 => Some(Self::Crossing),
            _ => None,
        }
    }
}

impl TryFrom<u8> for MinutiaKind {
    type Error = RidgeprintError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_crossing_number(code).ok_or(RidgeprintError::InvalidTemplateEntry { code })
    }
}

impl fmt::Display for MinutiaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RidgeEnding => "ridge ending",
            Self::ContinuingRidge => "continuing ridge",
            Self::Bifurcation => "bifurcation",
            Self::Crossing => "crossing",
        };
        f.write_str(name)
    }
}

/// A validated landmark on the ridge skeleton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Minutia {
    /// Column in image pixels.
    pub x: usize,
    /// Row in image pixels.
    pub y: usize,
    /// Crossing-number class after validation.
    pub kind: MinutiaKind,
}

impl Minutia {
    pub fn new(x: usize, y: usize, kind: MinutiaKind) -> Self {
        Self { x, y, kind }
    }

    pub(crate) fn position(&self) -> (i64, i64) {
        (self.x as i64, self.y as i64)
    }
}

/// Counts of validated minutiae per crossing number.
///
/// Bucket 0 exists so the index equals the crossing number; it is never
/// incremented by the detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CnHistogram([u32; 5]);

impl CnHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn increment(&mut self, kind: MinutiaKind) {
        self.0[kind.code() as usize] += 1;
    }

    /// Returns the count for a class.
    pub fn count(&self, kind: MinutiaKind) -> u32 {
        self.0[kind.code() as usize]
    }

    /// Returns the raw buckets indexed by crossing number.
    pub fn buckets(&self) -> [u32; 5] {
        self.0
    }

    /// Total number of validated minutiae.
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// True when every bucket is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{CnHistogram, MinutiaKind};
    use crate::util::RidgeprintError;

    #[test]
    fn kind_codes_round_trip_through_try_from() {
        for code in 1u8..=4 {
            let kind = MinutiaKind::try_from(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(
            MinutiaKind::try_from(0u8),
            Err(RidgeprintError::InvalidTemplateEntry { code: 0 })
        );
        assert_eq!(
            MinutiaKind::try_from(5u8),
            Err(RidgeprintError::InvalidTemplateEntry { code: 5 })
        );
    }

    #[test]
    fn kinds_order_by_code() {
        assert!(MinutiaKind::RidgeEnding < MinutiaKind::ContinuingRidge);
        assert!(MinutiaKind::Bifurcation < MinutiaKind::Crossing);
    }

    #[test]
    fn histogram_tracks_buckets() {
        let mut hist = CnHistogram::new();
        assert!(hist.is_empty());
        hist.increment(MinutiaKind::Bifurcation);
        hist.increment(MinutiaKind::Bifurcation);
        hist.increment(MinutiaKind::RidgeEnding);
        assert_eq!(hist.buckets(), [0, 1, 0, 2, 0]);
        assert_eq!(hist.count(MinutiaKind::Bifurcation), 2);
        assert_eq!(hist.total(), 3);
        assert!(!hist.is_empty());
    }
}
