#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ridgeprint::{
    BoundaryPolygon, CnHistogram, CnMap, Detection, DetectorConfig, FixedBoundary, Minutia,
    MinutiaeDetector, RidgeImage, RidgeprintResult, TemplateEntry, TemplateMatcher,
};

fn noisy_skeleton(seed: u64) -> RidgeImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; 300 * 300];
    for value in data.iter_mut() {
        *value = u8::from(rng.random_range(0..10) == 0);
    }
    RidgeImage::from_bits(data, 300, 300).unwrap()
}

fn summarize(
    result: RidgeprintResult<Detection>,
) -> RidgeprintResult<(Vec<Minutia>, CnHistogram, CnMap)> {
    result.map(|d| (d.minutiae, d.histogram, d.cn_map))
}

#[test]
fn parallel_detection_matches_sequential() {
    let boundary = BoundaryPolygon::from_rect(20, 30, 270, 260);
    for seed in [1u64, 2, 3] {
        let img = noisy_skeleton(seed);
        let sequential = MinutiaeDetector::new(FixedBoundary(boundary)).detect(&img);
        let parallel = MinutiaeDetector::new(FixedBoundary(boundary))
            .with_config(DetectorConfig {
                parallel: true,
                ..DetectorConfig::default()
            })
            .detect(&img);
        assert_eq!(summarize(parallel), summarize(sequential));
    }
}

#[test]
fn compare_many_matches_individual_comparisons() {
    let e = |d: u32, c: u8| TemplateEntry::try_from((d, c)).unwrap();
    let probe = vec![e(1, 1), e(2, 2), e(3, 3), e(4, 4)];
    let references: Vec<Vec<TemplateEntry>> = (0..16u32)
        .map(|i| (0..=i).map(|d| e(d, (d % 4 + 1) as u8)).collect())
        .collect();
    let matcher = TemplateMatcher::new();
    let batch = matcher.compare_many(&probe, &references);
    for (reference, result) in references.iter().zip(batch) {
        assert_eq!(result, matcher.compare(&probe, reference));
    }
}
