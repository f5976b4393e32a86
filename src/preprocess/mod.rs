//! Default preprocessing collaborators built on `image` and `imageproc`.
//!
//! The detector expects a canonical-size, binarized, thinned skeleton with
//! tiny blobs removed. These functions produce one from a grayscale scan.
//! Intermediate images are 0/255 `GrayImage`s with ridges in white.

mod blobs;
mod thin;

pub use blobs::suppress_small_regions;
pub use thin::thin;

use crate::detect::CANONICAL_SIZE;
use crate::trace::{trace_event, trace_span};
use image::imageops::{self, FilterType};
use image::GrayImage;
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Configuration for the preprocessing chain.
#[derive(Clone, Debug)]
pub struct PreprocessConfig {
    /// Side length of the canonical square image.
    pub size: u32,
    /// Outer-contour area below which a component is erased after thinning.
    pub min_blob_area: f64,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            size: CANONICAL_SIZE as u32,
            min_blob_area: 1.0,
        }
    }
}

/// Resizes to a `size x size` square with bilinear filtering.
pub fn resize_to_canonical(img: &GrayImage, size: u32) -> GrayImage {
    imageops::resize(img, size, size, FilterType::Triangle)
}

/// Otsu threshold with inversion: dark ridges become 255, paper becomes 0.
pub fn binarize(img: &GrayImage) -> GrayImage {
    let level = otsu_level(img);
    trace_event!("otsu", threshold = level);
    threshold(img, level, ThresholdType::BinaryInverted)
}

/// Runs resize, binarization, thinning and blob suppression in that order.
pub fn skeletonize(img: &GrayImage, cfg: &PreprocessConfig) -> GrayImage {
    let _span = trace_span!("skeletonize", size = cfg.size).entered();
    let resized = resize_to_canonical(img, cfg.size);
    let binary = binarize(&resized);
    let thinned = thin(&binary);
    suppress_small_regions(&thinned, cfg.min_blob_area)
}
