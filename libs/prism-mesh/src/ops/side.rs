//! # Side Faces
//!
//! Vertical quads along a boundary loop, one per edge subdivision and
//! consecutive Z-level pair. Edges split at the base XY length only;
//! refinement bands never change side-face counts.

use super::subdivided_edges;
use crate::error::MeshResult;
use crate::geometry::Polygon2D;
use crate::mesh::{Mesh, Quad, Surface};
use crate::refine::RefinementPolicy;
use glam::{DVec2, DVec3};

/// Emits the side quads of one loop and returns how many were added.
///
/// Each edge is split into `ceil(length / target_xy)` pieces.
///
/// Corners run `(start, z_lo), (end, z_lo), (end, z_hi), (start, z_hi)` for
/// `outward` loops (the footprint) and in reverse for inward loops (holes),
/// so both face away from the material.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::Polygon2D;
/// use prism_mesh::mesh::Mesh;
/// use prism_mesh::ops::side::generate_side_faces;
/// use glam::DVec2;
///
/// let square = Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(2.0));
/// let mut mesh = Mesh::new();
/// let added = generate_side_faces(&square, &[0.0, 1.0, 2.0], 1.0, true, &mut mesh).unwrap();
/// assert_eq!(added, 16);
/// ```
///
/// # Errors
///
/// `TooManySubdivisions` when an edge exceeds the subdivision limit. Quads
/// of edges before the failing one have already been added.
pub fn generate_side_faces(
    boundary: &Polygon2D,
    z_levels: &[f64],
    target_xy: f64,
    outward: bool,
    mesh: &mut Mesh,
) -> MeshResult<usize> {
    let policy = RefinementPolicy::inactive(target_xy);
    let mut added = 0;
    for run in subdivided_edges(boundary, &policy) {
        let run = run?;
        for span in run.windows(2) {
            for z in z_levels.windows(2) {
                mesh.add_quad(side_quad(span[0], span[1], z[0], z[1], outward));
                added += 1;
            }
        }
    }
    Ok(added)
}

fn side_quad(start: DVec2, end: DVec2, z_lo: f64, z_hi: f64, outward: bool) -> Quad {
    let corners = [
        start.extend(z_lo),
        end.extend(z_lo),
        end.extend(z_hi),
        start.extend(z_hi),
    ];
    let vertices: [DVec3; 4] = if outward {
        corners
    } else {
        [corners[3], corners[2], corners[1], corners[0]]
    };
    Quad::plain(vertices, Surface::Side)
}
