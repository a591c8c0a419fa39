//! # Tessellated Caps
//!
//! Generic cap path for arbitrary outlines: densify the boundary,
//! triangulate outline and holes under the even-odd rule, then pair the
//! triangles into quads.

use super::pairing::pair_triangles;
use super::{CapRegion, PlanarFace};
use crate::error::MeshResult;
use crate::geometry::{has_positive_area, orientation};
use crate::mesh::QuadKind;
use crate::ops::densified_contour;
use crate::refine::RefinementPolicy;
use crate::triangulate::Triangulator;
#[cfg(test)]
use glam::DVec2;
use tracing::{debug, warn};

/// Planar faces of a tessellated cap.
///
/// # Arguments
///
/// * `region` - Outline and holes of the capped area
/// * `policy` - Refinement policy deciding boundary edge lengths
/// * `min_quality` - Pairs scoring below this stay triangles
/// * `keep_triangles` - Emit leftovers as triangles instead of degenerate quads
/// * `triangulator` - Triangulation backend
///
/// # Errors
///
/// `TooManySubdivisions` when densifying a contour edge exceeds the limit.
pub fn tessellated_faces(
    region: &CapRegion,
    policy: &RefinementPolicy,
    min_quality: f64,
    keep_triangles: bool,
    triangulator: &dyn Triangulator,
) -> MeshResult<Vec<PlanarFace>> {
    let contours = std::iter::once(&region.outline)
        .chain(&region.holes)
        .map(|boundary| densified_contour(boundary, policy))
        .collect::<MeshResult<Vec<_>>>()?;

    let triangulation = triangulator.triangulate(&contours);
    let vertices = &triangulation.vertices;
    let triangles: Vec<[usize; 3]> = triangulation
        .resolved_triangles()
        .filter_map(|[a, b, c]| {
            let (pa, pb, pc) = (vertices[a], vertices[b], vertices[c]);
            if !has_positive_area(&[pa, pb, pc]) {
                return None;
            }
            if orientation(pa, pb, pc) < 0.0 {
                Some([a, c, b])
            } else {
                Some([a, b, c])
            }
        })
        .collect();

    if triangles.is_empty() {
        warn!(contours = contours.len(), "tessellated cap produced no triangles");
        return Ok(Vec::new());
    }

    let pairing = pair_triangles(vertices, &triangles, min_quality);
    debug!(
        triangles = triangles.len(),
        quads = pairing.quads.len(),
        unpaired = pairing.unpaired.len(),
        "paired cap triangles"
    );

    let mut faces = Vec::with_capacity(pairing.quads.len() + pairing.unpaired.len());
    for candidate in &pairing.quads {
        faces.push(PlanarFace::Quad {
            corners: candidate.corners.map(|i| vertices[i]),
            kind: QuadKind::Scored(candidate.score),
        });
    }
    for &t in &pairing.unpaired {
        let corners = triangles[t].map(|i| vertices[i]);
        faces.push(if keep_triangles {
            PlanarFace::Triangle(corners)
        } else {
            PlanarFace::degenerate(corners)
        });
    }
    Ok(faces)
}
