//! Image views and the binary ridge grid.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `RidgeImage` is the
//! owned, contiguous skeleton grid consumed by the detector: every pixel is
//! either 0 (background) or 1 (ridge).

use crate::util::{RidgeprintError, RidgeprintResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Binarization threshold applied to 8-bit inputs; values above it are ridge.
pub const RIDGE_THRESHOLD: u8 = 127;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> RidgeprintResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> RidgeprintResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(RidgeprintError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> RidgeprintResult<usize> {
    if width == 0 || height == 0 {
        return Err(RidgeprintError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(RidgeprintError::InvalidConfig {
            reason: "stride must be at least the width",
        });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(RidgeprintError::InvalidDimensions { width, height })
}

/// Owned binary ridge skeleton, 1 for ridge and 0 for background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RidgeImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RidgeImage {
    /// Builds a ridge image from an 8-bit buffer, treating values above
    /// [`RIDGE_THRESHOLD`] as ridge.
    pub fn from_u8(data: Vec<u8>, width: usize, height: usize) -> RidgeprintResult<Self> {
        Self::from_vec_with(data, width, height, |v| v > RIDGE_THRESHOLD)
    }

    /// Builds a ridge image from a buffer where any non-zero value is ridge.
    pub fn from_bits(data: Vec<u8>, width: usize, height: usize) -> RidgeprintResult<Self> {
        Self::from_vec_with(data, width, height, |v| v != 0)
    }

    /// Builds a ridge image by evaluating `is_ridge(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut is_ridge: impl FnMut(usize, usize) -> bool,
    ) -> RidgeprintResult<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(RidgeprintError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(u8::from(is_ridge(x, y)));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a borrowed 8-bit view, thresholding at [`RIDGE_THRESHOLD`].
    pub fn from_view(view: ImageView<'_, u8>) -> RidgeprintResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or(RidgeprintError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: y * view.stride(),
            })?;
            data.extend(row.iter().map(|&v| u8::from(v > RIDGE_THRESHOLD)));
        }
        Ok(Self {
            data,
            width: view.width(),
            height: view.height(),
        })
    }

    fn from_vec_with(
        mut data: Vec<u8>,
        width: usize,
        height: usize,
        is_ridge: impl Fn(u8) -> bool,
    ) -> RidgeprintResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(RidgeprintError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(RidgeprintError::InvalidDimensions { width, height });
        }
        for value in data.iter_mut() {
            *value = u8::from(is_ridge(*value));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the 0/1 pixel buffer in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at column `x`, row `y`; out-of-range reads are background.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Returns the number of ridge pixels.
    pub fn ridge_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
