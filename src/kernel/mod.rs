//! Structural 3x3 kernels and the correlation that turns them into weight maps.
//!
//! The detector validates crossing-number candidates against three fixed
//! matched filters. Responses are saturated into `[0, 255]`, so any negative
//! correlation reads back as zero.

use crate::image::RidgeImage;

/// Row-major 3x3 correlation kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kernel3x3(pub [[i32; 3]; 3]);

/// Responds to a ridge that terminates on the left of the centre pixel.
pub const LINE_END_A: Kernel3x3 = Kernel3x3([[-1, -1, -1], [-1, 1, 1], [-1, -1, -1]]);

/// Responds to a ridge that terminates on the right of the centre pixel.
pub const LINE_END_B: Kernel3x3 = Kernel3x3([[-1, -1, -1], [1, 1, -1], [-1, -1, -1]]);

/// Responds to a plus-shaped junction around the centre pixel.
pub const CROSS: Kernel3x3 = Kernel3x3([[-1, 1, -1], [1, 1, 1], [-1, 1, -1]]);

/// Per-pixel filter response, saturated to `u8`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMap {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl WeightMap {
    /// Returns the response at column `x`, row `y`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Returns the map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Correlates a ridge grid with a 3x3 kernel.
///
/// Borders are reflected without repeating the edge pixel (`gfedcb|abcdefgh`).
pub fn correlate3x3(image: &RidgeImage, kernel: &Kernel3x3) -> WeightMap {
    let width = image.width();
    let height = image.height();
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0i32;
            for (ky, krow) in kernel.0.iter().enumerate() {
                let sy = reflect101(y as isize + ky as isize - 1, height);
                for (kx, &weight) in krow.iter().enumerate() {
                    if weight == 0 {
                        continue;
                    }
                    let sx = reflect101(x as isize + kx as isize - 1, width);
                    acc += weight * i32::from(image.at(sx, sy));
                }
            }
            data.push(acc.clamp(0, 255) as u8);
        }
    }
    WeightMap {
        data,
        width,
        height,
    }
}

fn reflect101(idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = idx;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

/// The three weight maps used to validate crossing-number candidates.
pub struct StructureWeights {
    pub line_end_a: WeightMap,
    pub line_end_b: WeightMap,
    pub cross: WeightMap,
}

impl StructureWeights {
    /// Correlates the ridge grid with every structural kernel.
    pub fn compute(image: &RidgeImage) -> Self {
        Self {
            line_end_a: correlate3x3(image, &LINE_END_A),
            line_end_b: correlate3x3(image, &LINE_END_B),
            cross: correlate3x3(image, &CROSS),
        }
    }

    /// Summed line-end response at `(x, y)`.
    #[inline]
    pub fn line_end_sum(&self, x: usize, y: usize) -> u32 {
        u32::from(self.line_end_a.at(x, y)) + u32::from(self.line_end_b.at(x, y))
    }
}
