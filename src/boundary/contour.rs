//! Boundary oracle built on `imageproc` contour tracing.

use crate::boundary::{BoundaryOracle, BoundaryPolygon};
use crate::image::io::gray_from_ridge_image;
use crate::image::RidgeImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{RidgeprintError, RidgeprintResult};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::filter::box_filter;
use imageproc::geometry::min_area_rect;
use imageproc::point::Point;

/// Configuration for contour-based boundary extraction.
#[derive(Clone, Debug)]
pub struct BoundaryConfig {
    /// Box-filter radius used to merge skeleton strands into one blob.
    pub smoothing_radius: u32,
    /// Scale applied to the rectangle vertices, truncated back to integers.
    pub margin: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            smoothing_radius: 10,
            margin: 1.0,
        }
    }
}

/// Minimum-area rectangle of the largest outer contour after smoothing.
#[derive(Clone, Debug, Default)]
pub struct ContourBoundary {
    cfg: BoundaryConfig,
}

impl ContourBoundary {
    pub fn new(cfg: BoundaryConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.cfg
    }
}

impl BoundaryOracle for ContourBoundary {
    fn find_boundary(&self, image: &RidgeImage) -> RidgeprintResult<BoundaryPolygon> {
        let _span = trace_span!("find_boundary").entered();
        if !self.cfg.margin.is_finite() || self.cfg.margin <= 0.0 {
            return Err(RidgeprintError::InvalidConfig {
                reason: "boundary margin must be positive",
            });
        }

        let gray = gray_from_ridge_image(image);
        let radius = self.cfg.smoothing_radius;
        let blurred = box_filter(&gray, radius, radius);
        let contours: Vec<Contour<i32>> = find_contours(&blurred);

        let largest = contours
            .iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .filter(|c| !c.points.is_empty())
            .max_by(|a, b| polygon_area(&a.points).total_cmp(&polygon_area(&b.points)))
            .ok_or(RidgeprintError::BoundaryExtraction {
                reason: "no external contour found",
            })?;

        let rect = min_area_rect(&largest.points);
        let margin = self.cfg.margin;
        let corners = rect.map(|p| {
            (
                (p.x as f32 * margin).trunc() as i32,
                (p.y as f32 * margin).trunc() as i32,
            )
        });
        let polygon = BoundaryPolygon::from_corners(corners);
        trace_event!(
            "boundary",
            contours = contours.len(),
            radius = polygon.radius()
        );
        Ok(polygon)
    }
}

/// Shoelace area of a closed polygon.
pub(crate) fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }
    (twice as f64 / 2.0).abs()
}
