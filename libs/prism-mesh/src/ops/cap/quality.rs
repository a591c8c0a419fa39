//! # Quad Quality
//!
//! Score used to rank candidate quads during triangle pairing.
//!
//! `score = 0.6 * aspect + 0.35 * ortho + 0.05 * area_positive`, where
//! `aspect` is min/max edge length, `ortho` is one minus the mean absolute
//! corner cosine and `area_positive` is 1 when the quad encloses area.
//! The weights decide tie-breaks in the greedy matching and must not drift.

use crate::geometry::{corner_abs_cosine, has_positive_area};
use config::constants::{
    AREA_EPSILON, QUALITY_WEIGHT_AREA, QUALITY_WEIGHT_ASPECT, QUALITY_WEIGHT_ORTHO,
};
use glam::DVec2;

/// Scores a quad given in boundary order. Result lies in [0, 1].
///
/// # Example
///
/// ```rust
/// use prism_mesh::ops::cap::quality::quad_quality;
/// use glam::DVec2;
///
/// let square = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
/// assert!((quad_quality(&square) - 1.0).abs() < 1e-12);
/// ```
pub fn quad_quality(corners: &[DVec2; 4]) -> f64 {
    let lengths: [f64; 4] = std::array::from_fn(|i| corners[i].distance(corners[(i + 1) % 4]));
    let max = lengths.iter().copied().fold(0.0, f64::max);
    let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
    let aspect = if max <= AREA_EPSILON { 0.0 } else { min / max };

    let mean_cosine = (0..4)
        .map(|i| corner_abs_cosine(corners[(i + 3) % 4], corners[i], corners[(i + 1) % 4]))
        .sum::<f64>()
        / 4.0;
    let ortho = 1.0 - mean_cosine;

    let area_positive = if has_positive_area(corners) { 1.0 } else { 0.0 };

    (QUALITY_WEIGHT_ASPECT * aspect + QUALITY_WEIGHT_ORTHO * ortho + QUALITY_WEIGHT_AREA * area_positive)
        .clamp(0.0, 1.0)
}
