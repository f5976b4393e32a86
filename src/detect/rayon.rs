//! Row-parallel scan (feature-gated).
//!
//! Rows are classified independently and collected in row order, so the
//! merged output is the same raster sequence the sequential scan produces.

use super::crossing::ScanContext;
use crate::minutia::Minutia;
use rayon::prelude::*;
use std::ops::RangeInclusive;

pub(crate) fn scan_rows_par(ctx: &ScanContext<'_>, rows: RangeInclusive<usize>) -> Vec<Vec<Minutia>> {
    rows.into_par_iter().map(|y| ctx.scan_row(y)).collect()
}
