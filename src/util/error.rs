//! Error types for ridgeprint.

use thiserror::Error;

/// Result alias for ridgeprint operations.
pub type RidgeprintResult<T> = std::result::Result<T, RidgeprintError>;

/// Errors that can occur while detecting, building, storing or comparing
/// fingerprint templates.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RidgeprintError {
    /// Detection produced an all-zero crossing-number histogram.
    #[error("no minutiae detected")]
    NoMinutiaeFound,
    /// Template construction was given no minutiae.
    #[error("cannot build a template from an empty minutiae set")]
    EmptyMinutiaeSet,
    /// Template comparison was given an empty probe.
    #[error("cannot compare an empty template")]
    EmptyTemplate,
    /// The boundary collaborator could not produce a polygon.
    #[error("boundary extraction failed: {reason}")]
    BoundaryExtraction { reason: &'static str },
    /// Image dimensions are zero or do not fit the configured grid.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer is smaller than the declared dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// A serialized pair carried an unknown minutia type code.
    #[error("invalid template entry: unknown minutia type {code}")]
    InvalidTemplateEntry { code: u8 },
    /// Image decoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
    /// Reading or writing a template file failed.
    #[error("template io: {reason}")]
    TemplateIo { reason: String },
    /// A template file was not a list of `[distance, type]` pairs.
    #[error("template format: {reason}")]
    TemplateFormat { reason: String },
}
