//! Ridgeprint extracts compact fingerprint templates from ridge skeletons and
//! scores their similarity.
//!
//! Detection classifies skeleton pixels by crossing number and validates them
//! with structural filters and the boundary of the print. Templates are sorted,
//! deduplicated sets of inter-minutiae distances tagged with minutia type, and
//! comparison is a halved set intersection scored in `[0, 100]`. The
//! `image-io` feature adds default preprocessing built on `imageproc`; row
//! parallel detection is available with the `rayon` feature.

pub mod boundary;
pub mod detect;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod matcher;
pub mod minutia;
#[cfg(feature = "image-io")]
pub mod pipeline;
#[cfg(feature = "image-io")]
pub mod preprocess;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;
pub use crate::image::{ImageView, RidgeImage};
pub use boundary::{BoundaryOracle, BoundaryPolygon, FixedBoundary};
#[cfg(feature = "image-io")]
pub use boundary::{BoundaryConfig, ContourBoundary};
pub use detect::{CnMap, Detection, DetectorConfig, MinutiaeDetector, CANONICAL_SIZE};
pub use matcher::{MatchOutcome, TemplateMatcher};
pub use minutia::{CnHistogram, Minutia, MinutiaKind};
#[cfg(feature = "image-io")]
pub use pipeline::{extract_template, Extraction, PipelineConfig};
#[cfg(feature = "image-io")]
pub use preprocess::PreprocessConfig;
pub use template::store::TemplateStore;
pub use template::{PairingStrategy, Template, TemplateBuilder, TemplateEntry};
pub use util::{RidgeprintError, RidgeprintResult};
