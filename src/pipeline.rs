//! End-to-end enrollment and verification from grayscale images.
//!
//! Available when the `image-io` feature is enabled.

use crate::boundary::{BoundaryConfig, ContourBoundary};
use crate::detect::{Detection, DetectorConfig, MinutiaeDetector};
use crate::image::io::{load_gray_image, ridge_from_gray_image};
use crate::matcher::{MatchOutcome, TemplateMatcher};
use crate::preprocess::{skeletonize, PreprocessConfig};
use crate::template::store::TemplateStore;
use crate::template::{PairingStrategy, Template, TemplateBuilder, TemplateEntry};
use crate::trace::trace_span;
use crate::util::{RidgeprintError, RidgeprintResult};
use image::GrayImage;
use std::path::Path;

/// Configuration for every stage from scan to template.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    pub preprocess: PreprocessConfig,
    pub boundary: BoundaryConfig,
    pub detector: DetectorConfig,
    pub pairing: PairingStrategy,
}

impl PipelineConfig {
    fn validate(&self) -> RidgeprintResult<()> {
        let size = self.preprocess.size as usize;
        if size == 0 {
            return Err(RidgeprintError::InvalidConfig {
                reason: "preprocess size must be positive",
            });
        }
        if self.detector.width != size || self.detector.height != size {
            return Err(RidgeprintError::InvalidConfig {
                reason: "detector size must equal the preprocess size",
            });
        }
        Ok(())
    }
}

/// Detection and template produced from one image.
#[derive(Clone, Debug)]
pub struct Extraction {
    pub detection: Detection,
    pub template: Template,
}

/// Extracts a template from a grayscale fingerprint scan.
pub fn extract_template(img: &GrayImage, cfg: &PipelineConfig) -> RidgeprintResult<Extraction> {
    cfg.validate()?;
    let _span = trace_span!("extract_template").entered();
    let skeleton = skeletonize(img, &cfg.preprocess);
    let ridge = ridge_from_gray_image(&skeleton)?;
    let detector = MinutiaeDetector::new(ContourBoundary::new(cfg.boundary.clone()))
        .with_config(cfg.detector.clone());
    let detection = detector.detect(&ridge)?;
    let template = TemplateBuilder::new()
        .with_pairing(cfg.pairing)
        .build(&detection.minutiae)?;
    Ok(Extraction {
        detection,
        template,
    })
}

/// Loads an image file and extracts its template.
pub fn template_from_path<P: AsRef<Path>>(
    path: P,
    cfg: &PipelineConfig,
) -> RidgeprintResult<Template> {
    let img = load_gray_image(path)?;
    Ok(extract_template(&img, cfg)?.template)
}

/// Builds a template from `image_path` and stores it under `name`.
pub fn enroll<P: AsRef<Path>>(
    store: &TemplateStore,
    name: &str,
    image_path: P,
    cfg: &PipelineConfig,
) -> RidgeprintResult<Template> {
    let template = template_from_path(image_path, cfg)?;
    store.save(name, template.entries())?;
    Ok(template)
}

/// Compares two stored templates.
pub fn verify(
    store: &TemplateStore,
    candidate: &str,
    reference: &str,
) -> RidgeprintResult<MatchOutcome> {
    let candidate = store.load(candidate)?;
    let reference = store.load(reference)?;
    TemplateMatcher::new().compare(&candidate, &reference)
}

/// Accumulates stored samples and saves the result under `output`.
pub fn accumulate(
    store: &TemplateStore,
    samples: &[String],
    output: &str,
) -> RidgeprintResult<Vec<TemplateEntry>> {
    let loaded = samples
        .iter()
        .map(|name| store.load(name))
        .collect::<RidgeprintResult<Vec<_>>>()?;
    let acc = TemplateMatcher::new().accumulate(&loaded)?;
    store.save(output, &acc)?;
    Ok(acc)
}
