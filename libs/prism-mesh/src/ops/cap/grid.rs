//! # Rectangle Grid Caps
//!
//! Fast path for axis-aligned rectangular outlines: a structured grid of
//! cells clipped against the holes by cell center.
//!
//! With an active refinement policy the rectangle is gridded twice: a
//! coarse grid keeping cells outside every band, and a fine grid at the
//! finest active length keeping cells inside a band. The two grids are not
//! stitched along the band border.

use crate::error::{MeshError, MeshResult};
use crate::geometry::Polygon2D;
use crate::refine::RefinementPolicy;
use config::constants::{segment_count, MAX_CAP_GRID_CELLS};
use glam::DVec2;

/// Counter-clockwise cell corners of a rectangle cap.
///
/// # Arguments
///
/// * `min`, `max` - Rectangle bounds
/// * `outline` - The rectangle loop, used for the center containment test
/// * `holes` - Hole loops; cells centered inside any of them are dropped
/// * `policy` - Refinement policy of the capped region
///
/// # Errors
///
/// `TooManyCells` when either grid exceeds `MAX_CAP_GRID_CELLS`.
pub fn grid_cells(
    min: DVec2,
    max: DVec2,
    outline: &Polygon2D,
    holes: &[Polygon2D],
    policy: &RefinementPolicy,
) -> MeshResult<Vec<[DVec2; 4]>> {
    let keep = |center: DVec2| outline.contains(center) && !holes.iter().any(|h| h.contains(center));

    let Some(fine) = policy.fine_length() else {
        return collect_cells(min, max, policy.base_length(), &keep);
    };

    let mut cells = collect_cells(min, max, policy.base_length(), |c| {
        keep(c) && !policy.is_near(c)
    })?;
    cells.extend(collect_cells(min, max, fine, |c| keep(c) && policy.is_near(c))?);
    Ok(cells)
}

/// Grids `[min, max]` at `target` and keeps cells whose center passes `keep`.
fn collect_cells(
    min: DVec2,
    max: DVec2,
    target: f64,
    keep: impl Fn(DVec2) -> bool,
) -> MeshResult<Vec<[DVec2; 4]>> {
    let extent = max - min;
    let nx = segment_count(extent.x, target);
    let ny = segment_count(extent.y, target);
    let count = nx.saturating_mul(ny);
    if count > MAX_CAP_GRID_CELLS {
        return Err(MeshError::TooManyCells {
            count,
            max: MAX_CAP_GRID_CELLS,
        });
    }

    let xs = grid_lines(min.x, max.x, nx);
    let ys = grid_lines(min.y, max.y, ny);

    let mut cells = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let corners = [
                DVec2::new(xs[i], ys[j]),
                DVec2::new(xs[i + 1], ys[j]),
                DVec2::new(xs[i + 1], ys[j + 1]),
                DVec2::new(xs[i], ys[j + 1]),
            ];
            if keep((corners[0] + corners[2]) * 0.5) {
                cells.push(corners);
            }
        }
    }
    Ok(cells)
}

/// `n + 1` coordinates from `lo` to `hi`, endpoints exact.
fn grid_lines(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let extent = hi - lo;
    let mut lines: Vec<f64> = (0..n).map(|i| lo + extent * (i as f64 / n as f64)).collect();
    lines.push(hi);
    lines
}
