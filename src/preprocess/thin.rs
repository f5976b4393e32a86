//! Zhang-Suen thinning.

use image::{GrayImage, Luma};

/// Reduces white regions to one-pixel-wide skeletons.
///
/// Pixels on the image border are never removed; pixels outside the image
/// read as background.
pub fn thin(img: &GrayImage) -> GrayImage {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut bits: Vec<u8> = img.pixels().map(|p| u8::from(p[0] != 0)).collect();
    if width < 3 || height < 3 {
        return to_gray(&bits, width, height);
    }

    let mut marked = Vec::new();
    loop {
        let mut changed = false;
        for pass in 0..2 {
            marked.clear();
            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    if bits[y * width + x] == 1 && removable(&bits, width, x, y, pass) {
                        marked.push(y * width + x);
                    }
                }
            }
            changed |= !marked.is_empty();
            for &idx in &marked {
                bits[idx] = 0;
            }
        }
        if !changed {
            break;
        }
    }
    to_gray(&bits, width, height)
}

fn removable(bits: &[u8], width: usize, x: usize, y: usize, pass: usize) -> bool {
    let at = |dx: isize, dy: isize| {
        let xx = (x as isize + dx) as usize;
        let yy = (y as isize + dy) as usize;
        bits[yy * width + xx]
    };
    // P2..P9 clockwise from north.
    let p = [
        at(0, -1),
        at(1, -1),
        at(1, 0),
        at(1, 1),
        at(0, 1),
        at(-1, 1),
        at(-1, 0),
        at(-1, -1),
    ];
    let neighbours: u8 = p.iter().sum();
    if !(2..=6).contains(&neighbours) {
        return false;
    }
    let rises = (0..8).filter(|&i| p[i] == 0 && p[(i + 1) % 8] == 1).count();
    if rises != 1 {
        return false;
    }
    let (n, e, s, w) = (p[0], p[2], p[4], p[6]);
    if pass == 0 {
        n * e * s == 0 && e * s * w == 0
    } else {
        n * e * w == 0 && n * s * w == 0
    }
}

fn to_gray(bits: &[u8], width: usize, height: usize) -> GrayImage {
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([bits[y as usize * width + x as usize] * 255])
    })
}
