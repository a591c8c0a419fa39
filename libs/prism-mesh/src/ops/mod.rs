//! # Meshing Operations
//!
//! Face generators driven by the pipeline:
//! - **side**: vertical quads along footprint and hole loops
//! - **cap**: horizontal faces at the base, the top and each slab
//!
//! Both generators subdivide loop edges through [`subdivided_edges`]. Side
//! faces always split at the base XY length; without active refinement the
//! boundary vertices of a cap coincide bit-exactly with the bottom and top
//! rows of the adjacent side faces.

pub mod cap;
pub mod side;

use crate::error::MeshResult;
use crate::geometry::{subdivide_edge, Polygon2D};
use crate::refine::RefinementPolicy;
use glam::DVec2;

/// Subdivision points of every non-degenerate edge of `boundary`.
///
/// Each edge is split at the target length the policy assigns to its
/// midpoint. Zero-length edges are skipped. Every returned run includes
/// both edge endpoints; an edge over the subdivision limit yields an error.
pub fn subdivided_edges<'a>(
    boundary: &'a Polygon2D,
    policy: &'a RefinementPolicy,
) -> impl Iterator<Item = MeshResult<Vec<DVec2>>> + 'a {
    boundary
        .edges()
        .filter(|(a, b)| a != b)
        .map(|(a, b)| subdivide_edge(a, b, policy.length_at(a.lerp(b, 0.5))))
}

/// Closed contour through all subdivision points of `boundary`.
///
/// # Errors
///
/// `TooManySubdivisions` when an edge exceeds the subdivision limit.
pub fn densified_contour(
    boundary: &Polygon2D,
    policy: &RefinementPolicy,
) -> MeshResult<Vec<DVec2>> {
    let mut contour = Vec::new();
    for run in subdivided_edges(boundary, policy) {
        let run = run?;
        contour.extend_from_slice(&run[..run.len() - 1]);
    }
    Ok(contour)
}
