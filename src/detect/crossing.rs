//! Crossing-number classification of skeleton pixels.

use crate::boundary::BoundaryPolygon;
use crate::image::RidgeImage;
use crate::kernel::StructureWeights;
use crate::minutia::{Minutia, MinutiaKind};

/// Line-end response expected at a validated ridge ending.
const RIDGE_ENDING_LINE_SUM: u32 = 1;
/// Line-end response expected at a validated continuing ridge point.
const CONTINUING_LINE_SUM: u32 = 3;
/// Minimum cross response at a validated bifurcation.
const BIFURCATION_CROSS_MIN: u8 = 3;

/// Returns the 8 neighbours of `(x, y)` starting at the right neighbour and
/// walking through the row above.
///
/// Neighbours outside the image read as background, so border pixels are
/// safe to query.
pub fn neighborhood(image: &RidgeImage, x: usize, y: usize) -> [u8; 8] {
    // Wrapped indices land past the far edge, where `at` returns 0.
    let (xl, yu) = (x.wrapping_sub(1), y.wrapping_sub(1));
    [
        image.at(x + 1, y),
        image.at(x + 1, yu),
        image.at(x, yu),
        image.at(xl, yu),
        image.at(xl, y),
        image.at(xl, y + 1),
        image.at(x, y + 1),
        image.at(x + 1, y + 1),
    ]
}

/// Half the number of 0/1 transitions around the closed 8-cycle.
pub fn crossing_number(p: &[u8; 8]) -> u8 {
    let sum: f64 = (0..8)
        .map(|i| (f64::from(p[i]) - f64::from(p[(i + 1) % 8])).abs())
        .sum();
    (0.5 * sum) as u8
}

/// Everything the per-pixel classifier needs, shared by all rows of a scan.
pub(crate) struct ScanContext<'a> {
    pub image: &'a RidgeImage,
    pub weights: &'a StructureWeights,
    pub boundary: BoundaryPolygon,
}

impl ScanContext<'_> {
    /// Rows and columns visited by the scan: one pixel of margin plus the
    /// ring the neighbourhood reads from.
    pub fn interior(len: usize) -> std::ops::RangeInclusive<usize> {
        2..=len.saturating_sub(2)
    }

    /// Validated minutiae of row `y`, left to right, with their crossing numbers.
    pub fn scan_row(&self, y: usize) -> Vec<Minutia> {
        let width = self.image.width();
        let height = self.image.height();
        let mut out = Vec::new();
        for x in Self::interior(width) {
            // Boundary tests are evaluated at (row, column).
            let probe = (y as i64, x as i64);
            if !self.boundary.contains(probe, width, height) {
                continue;
            }
            let cn = crossing_number(&neighborhood(self.image, x, y));
            if let Some(kind) = self.validate(cn, x, y, probe) {
                out.push(Minutia::new(x, y, kind));
            }
        }
        out
    }

    fn validate(&self, cn: u8, x: usize, y: usize, probe: (i64, i64)) -> Option<MinutiaKind> {
        let kind = MinutiaKind::from_crossing_number(cn)?;
        let valid = match kind {
            MinutiaKind::RidgeEnding => {
                self.weights.line_end_sum(x, y) == RIDGE_ENDING_LINE_SUM
                    && !self.boundary.is_peripheral(probe)
            }
            MinutiaKind::ContinuingRidge => {
                self.weights.line_end_sum(x, y) == CONTINUING_LINE_SUM
            }
            MinutiaKind::Bifurcation => self.weights.cross.at(x, y) >= BIFURCATION_CROSS_MIN,
            MinutiaKind::Crossing => true,
        };
        valid.then_some(kind)
    }
}
