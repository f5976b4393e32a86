//! Minutiae detection on a thinned ridge skeleton.
//!
//! Every interior pixel is classified by its crossing number, then validated
//! against the structural weight maps and the boundary polygon. Validated
//! minutiae are emitted in raster order (top to bottom, left to right), which
//! the template builder depends on.

mod crossing;
#[cfg(feature = "rayon")]
mod rayon;

pub use crossing::{crossing_number, neighborhood};

use crate::boundary::{BoundaryOracle, BoundaryPolygon};
use crate::image::RidgeImage;
use crate::kernel::StructureWeights;
use crate::minutia::{CnHistogram, Minutia};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{RidgeprintError, RidgeprintResult};
use crossing::ScanContext;

/// Canonical side length of the ridge grid.
pub const CANONICAL_SIZE: usize = 300;

/// Configuration for minutiae detection.
#[derive(Clone, Debug)]
pub struct DetectorConfig {
    /// Expected image width in pixels.
    pub width: usize,
    /// Expected image height in pixels.
    pub height: usize,
    /// Classify rows in parallel (requires the `rayon` feature; ignored otherwise).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            width: CANONICAL_SIZE,
            height: CANONICAL_SIZE,
            parallel: false,
        }
    }
}

/// Per-pixel crossing number of validated minutiae; 0 everywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CnMap {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl CnMap {
    fn from_minutiae(width: usize, height: usize, minutiae: &[Minutia]) -> Self {
        let mut data = vec![0u8; width * height];
        for m in minutiae {
            data[m.y * width + m.x] = m.kind.code();
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the class code at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Output of one detection run.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Validated minutiae per class.
    pub histogram: CnHistogram,
    /// Validated minutiae in raster order.
    pub minutiae: Vec<Minutia>,
    /// Dense class map of the validated minutiae.
    pub cn_map: CnMap,
    /// Boundary polygon the scan was filtered against.
    pub boundary: BoundaryPolygon,
}

/// Crossing-number minutiae detector.
pub struct MinutiaeDetector<B> {
    oracle: B,
    cfg: DetectorConfig,
}

impl<B: BoundaryOracle> MinutiaeDetector<B> {
    /// Creates a detector with the default 300x300 configuration.
    pub fn new(oracle: B) -> Self {
        Self {
            oracle,
            cfg: DetectorConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DetectorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Detects and validates minutiae on a thinned, blob-filtered skeleton.
    pub fn detect(&self, image: &RidgeImage) -> RidgeprintResult<Detection> {
        let width = image.width();
        let height = image.height();
        if width != self.cfg.width || height != self.cfg.height {
            trace_warn!(
                width,
                height,
                expected_width = self.cfg.width,
                expected_height = self.cfg.height,
                "ridge image does not match detector size"
            );
            return Err(RidgeprintError::InvalidDimensions { width, height });
        }

        let _span = trace_span!("detect", width = width, height = height).entered();

        let weights = StructureWeights::compute(image);
        let boundary = self.oracle.find_boundary(image)?;
        let ctx = ScanContext {
            image,
            weights: &weights,
            boundary,
        };

        let rows = self.scan_rows(&ctx, height);
        let mut histogram = CnHistogram::new();
        let mut minutiae = Vec::new();
        for row in rows {
            for m in row {
                histogram.increment(m.kind);
                minutiae.push(m);
            }
        }

        trace_event!(
            "minutiae",
            ridge_endings = histogram.buckets()[1],
            continuing = histogram.buckets()[2],
            bifurcations = histogram.buckets()[3],
            crossings = histogram.buckets()[4]
        );

        if histogram.is_empty() {
            return Err(RidgeprintError::NoMinutiaeFound);
        }

        let cn_map = CnMap::from_minutiae(width, height, &minutiae);
        Ok(Detection {
            histogram,
            minutiae,
            cn_map,
            boundary,
        })
    }

    #[cfg(feature = "rayon")]
    fn scan_rows(&self, ctx: &ScanContext<'_>, height: usize) -> Vec<Vec<Minutia>> {
        if self.cfg.parallel {
            return crate::detect::rayon::scan_rows_par(ctx, ScanContext::interior(height));
        }
        ScanContext::interior(height)
            .map(|y| ctx.scan_row(y))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn scan_rows(&self, ctx: &ScanContext<'_>, height: usize) -> Vec<Vec<Minutia>> {
        ScanContext::interior(height)
            .map(|y| ctx.scan_row(y))
            .collect()
    }
}
