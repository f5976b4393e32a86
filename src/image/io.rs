//! Conversions between `image` buffers and ridge grids, plus file loading.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, RidgeImage};
use crate::util::{RidgeprintError, RidgeprintResult};
use image::{GrayImage, Luma};
use std::path::Path;

/// Loads an image from disk and converts it to 8-bit grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> RidgeprintResult<GrayImage> {
    let img = image::open(path).map_err(|err| RidgeprintError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(img.to_luma8())
}

/// Thresholds a grayscale buffer into a ridge grid (values above 127 are ridge).
pub fn ridge_from_gray_image(img: &GrayImage) -> RidgeprintResult<RidgeImage> {
    let view = ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)?;
    RidgeImage::from_view(view)
}

/// Renders a ridge grid as a 0/255 grayscale buffer.
pub fn gray_from_ridge_image(ridge: &RidgeImage) -> GrayImage {
    let width = ridge.width() as u32;
    let height = ridge.height() as u32;
    GrayImage::from_fn(width, height, |x, y| {
        Luma([ridge.at(x as usize, y as usize) * 255])
    })
}
