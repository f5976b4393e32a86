//! Removal of tiny connected components.

use crate::boundary::polygon_area;
use crate::trace::trace_event;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::HashSet;

/// Erases every outermost component whose outer contour encloses less than
/// `min_area`.
///
/// Area is the polygon area of the traced border, so a straight one-pixel
/// line has area 0 and is erased by any positive threshold. Components nested
/// inside another component's hole are left alone.
pub fn suppress_small_regions(img: &GrayImage, min_area: f64) -> GrayImage {
    let contours: Vec<Contour<i32>> = find_contours(img);
    let labels = connected_components(img, Connectivity::Eight, Luma([0u8]));

    let doomed: HashSet<u32> = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter(|c| polygon_area(&c.points) < min_area)
        .filter_map(|c| c.points.first())
        .map(|p| labels.get_pixel(p.x as u32, p.y as u32)[0])
        .filter(|&label| label != 0)
        .collect();

    trace_event!("small_regions", removed = doomed.len());
    let mut out = img.clone();
    if doomed.is_empty() {
        return out;
    }
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if doomed.contains(&labels.get_pixel(x, y)[0]) {
            *pixel = Luma([0]);
        }
    }
    out
}
