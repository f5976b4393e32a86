#![cfg(feature = "image-io")]

use image::{GrayImage, Luma};
use ridgeprint::pipeline::{enroll, verify};
use ridgeprint::preprocess::skeletonize;
use ridgeprint::{
    extract_template, MinutiaKind, PipelineConfig, PreprocessConfig, RidgeprintError,
    TemplateEntry, TemplateStore,
};
use tempfile::TempDir;

const INK: u8 = 20;
const PAPER: u8 = 230;

/// Dark ridges three pixels thick on a 30 pixel lattice.
fn lattice_scan() -> GrayImage {
    GrayImage::from_fn(300, 300, |x, y| {
        let ridge = (14..=16).contains(&(y % 30)) || (14..=16).contains(&(x % 30));
        Luma([if ridge { INK } else { PAPER }])
    })
}

#[test]
fn skeleton_of_lattice_is_one_pixel_wide() {
    let skeleton = skeletonize(&lattice_scan(), &PreprocessConfig::default());
    assert_eq!(skeleton.dimensions(), (300, 300));
    for x in [5u32, 100, 200] {
        let hits = (0..30).filter(|&y| skeleton.get_pixel(x, y)[0] == 255).count();
        assert_eq!(hits, 1, "column {x} crosses one horizontal ridge");
    }
    assert_eq!(skeleton.get_pixel(15, 15)[0], 255);
}

#[test]
fn lattice_crossings_become_a_template() {
    let extraction = extract_template(&lattice_scan(), &PipelineConfig::default()).unwrap();
    let hist = extraction.detection.histogram;
    assert_eq!(hist.count(MinutiaKind::Crossing), 100);
    assert_eq!(hist.total(), 100);

    let crossing = |d| TemplateEntry::new(d, MinutiaKind::Crossing);
    assert_eq!(
        extraction.template.entries(),
        &[crossing(30), crossing(271), crossing(381)]
    );
}

#[test]
fn enroll_then_verify_from_files() {
    let dir = TempDir::new().expect("create temp dir");
    let image_path = dir.path().join("lattice.png");
    lattice_scan().save(&image_path).unwrap();

    let store = TemplateStore::new(dir.path().join("templates"));
    let cfg = PipelineConfig::default();
    let first = enroll(&store, "lattice_01", &image_path, &cfg).unwrap();
    let second = enroll(&store, "lattice_02", &image_path, &cfg).unwrap();
    assert_eq!(first, second);

    let outcome = verify(&store, "lattice_01", "lattice_02").unwrap();
    assert_eq!(outcome.raw_matches(), 3);
    assert_eq!(outcome.score, 34);

    let err = enroll(&store, "missing", dir.path().join("nope.png"), &cfg).unwrap_err();
    assert!(matches!(err, RidgeprintError::ImageIo { .. }));
}
