//! Low-level building blocks for custom detection pipelines.
//!
//! These expose the crossing-number classifier, the structural kernels and
//! the distance convention used by template construction. Most users should
//! prefer `MinutiaeDetector`, `TemplateBuilder` and `TemplateMatcher`.

pub use crate::detect::{crossing_number, neighborhood};
pub use crate::kernel::{
    correlate3x3, Kernel3x3, StructureWeights, WeightMap, CROSS, LINE_END_A, LINE_END_B,
};
pub use crate::template::store::{load_entries, save_entries};
pub use crate::util::math::trunc_distance;
