//! Planar distance and score arithmetic.
//!
//! Distances are truncated toward zero, never rounded. Templates built on one
//! machine must compare equal to templates built on another, so every caller
//! goes through these helpers.

/// Euclidean distance between two integer points, truncated to an integer.
pub fn trunc_distance(a: (i64, i64), b: (i64, i64)) -> u32 {
    let dx = (b.0 - a.0) as f64;
    let dy = (b.1 - a.1) as f64;
    (dx * dx + dy * dy).sqrt().trunc() as u32
}

/// Integer ceiling of `value / 2` for possibly negative values.
pub(crate) fn ceil_half(value: i32) -> i32 {
    (value as f64 / 2.0).ceil() as i32
}

/// Percentage `ceil(numerator / denominator * 100)` evaluated in `f64`.
///
/// The operation order is fixed: division first, then scaling. `7 / 100`
/// therefore scores 8, not 7.
pub(crate) fn ceil_percent(numerator: usize, denominator: usize) -> u32 {
    (numerator as f64 / denominator as f64 * 100.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::{ceil_half, ceil_percent, trunc_distance};

    #[test]
    fn distance_truncates_instead_of_rounding() {
        assert_eq!(trunc_distance((0, 0), (3, 4)), 5);
        // sqrt(8) = 2.83
        assert_eq!(trunc_distance((0, 0), (2, 2)), 2);
        assert_eq!(trunc_distance((5, 5), (5, 5)), 0);
        assert_eq!(trunc_distance((10, 1), (1, 10)), 12);
    }

    #[test]
    fn ceil_half_rounds_toward_positive_infinity() {
        assert_eq!(ceil_half(151), 76);
        assert_eq!(ceil_half(150), 75);
        assert_eq!(ceil_half(-3), -1);
    }

    #[test]
    fn ceil_percent_matches_float_evaluation() {
        assert_eq!(ceil_percent(1, 3), 34);
        assert_eq!(ceil_percent(3, 3), 100);
        assert_eq!(ceil_percent(0, 5), 0);
        assert_eq!(ceil_percent(7, 100), 8);
    }
}
