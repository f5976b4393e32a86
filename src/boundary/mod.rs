//! Boundary polygon of the ridge mass and the oracle that produces it.
//!
//! The polygon is the minimum-area rectangle around the print. The detector
//! uses it twice: to skip pixels outside the rectangle and to reject ridge
//! endings farther than `radius` from `center`, which are usually cut off by
//! the sensor rather than real terminations.

use crate::image::RidgeImage;
use crate::util::math::{ceil_half, trunc_distance};
use crate::util::RidgeprintResult;

#[cfg(feature = "image-io")]
mod contour;

#[cfg(feature = "image-io")]
pub(crate) use contour::polygon_area;
#[cfg(feature = "image-io")]
pub use contour::{BoundaryConfig, ContourBoundary};

/// Four integer vertices ordered bottom-left, top-left, top-right, bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryPolygon {
    vertices: [(i32, i32); 4],
}

impl BoundaryPolygon {
    /// Wraps vertices that are already in bottom-left, top-left, top-right,
    /// bottom-right order.
    pub fn new(vertices: [(i32, i32); 4]) -> Self {
        Self { vertices }
    }

    /// Orders four rectangle corners by angle around their centroid.
    pub fn from_corners(corners: [(i32, i32); 4]) -> Self {
        let cx = corners.iter().map(|p| p.0 as f64).sum::<f64>() / 4.0;
        let cy = corners.iter().map(|p| p.1 as f64).sum::<f64>() / 4.0;
        let mut sorted = corners;
        // y grows downwards: ascending atan2 visits top-left, top-right,
        // bottom-right, bottom-left.
        sorted.sort_by(|a, b| {
            let ta = (a.1 as f64 - cy).atan2(a.0 as f64 - cx);
            let tb = (b.1 as f64 - cy).atan2(b.0 as f64 - cx);
            ta.total_cmp(&tb)
        });
        Self {
            vertices: [sorted[3], sorted[0], sorted[1], sorted[2]],
        }
    }

    /// Axis-aligned rectangle from its top-left and bottom-right corners.
    pub fn from_rect(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            vertices: [(left, bottom), (left, top), (right, top), (right, bottom)],
        }
    }

    /// Returns the ordered vertices.
    pub fn vertices(&self) -> [(i32, i32); 4] {
        self.vertices
    }

    /// Peripheral reference point: half of the bottom-right vertex, rounded up.
    pub fn center(&self) -> (i32, i32) {
        let (x3, y3) = self.vertices[3];
        (ceil_half(x3), ceil_half(y3))
    }

    /// Half of the span between the top-left and bottom-right x, rounded up.
    pub fn radius(&self) -> i32 {
        ceil_half(self.vertices[3].0 - self.vertices[1].0)
    }

    /// True when the top-left or bottom-right vertex touches the frame of a
    /// `width x height` image, which disables the spatial check entirely.
    pub fn touches_frame(&self, width: usize, height: usize) -> bool {
        let (x1, y1) = self.vertices[1];
        let (x3, y3) = self.vertices[3];
        x1 == 0 || y1 == 0 || x3 as i64 == width as i64 || y3 as i64 == height as i64
    }

    /// Point-in-boundary test with the frame waiver.
    ///
    /// Inside means strictly between the top-left and bottom-right vertices on
    /// both axes.
    pub fn contains(&self, point: (i64, i64), width: usize, height: usize) -> bool {
        let (x1, y1) = self.vertices[1];
        let (x3, y3) = self.vertices[3];
        let (px, py) = point;
        let strictly_inside =
            px > x1 as i64 && px < x3 as i64 && py > y1 as i64 && py < y3 as i64;
        strictly_inside || self.touches_frame(width, height)
    }

    /// True when `point` is farther than `radius` from `center`.
    pub fn is_peripheral(&self, point: (i64, i64)) -> bool {
        let (cx, cy) = self.center();
        let dist = trunc_distance(point, (cx as i64, cy as i64));
        i64::from(dist) > i64::from(self.radius())
    }
}

/// Produces the boundary polygon of a ridge image.
pub trait BoundaryOracle {
    fn find_boundary(&self, image: &RidgeImage) -> RidgeprintResult<BoundaryPolygon>;
}

/// Oracle that returns a precomputed polygon regardless of the image.
#[derive(Clone, Copy, Debug)]
pub struct FixedBoundary(pub BoundaryPolygon);

impl BoundaryOracle for FixedBoundary {
    fn find_boundary(&self, _image: &RidgeImage) -> RidgeprintResult<BoundaryPolygon> {
        Ok(self.0)
    }
}

impl<T: BoundaryOracle + ?Sized> BoundaryOracle for &T {
    fn find_boundary(&self, image: &RidgeImage) -> RidgeprintResult<BoundaryPolygon> {
        (**self).find_boundary(image)
    }
}
