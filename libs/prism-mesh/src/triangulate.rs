//! # Polygon Triangulation
//!
//! Seam to the external triangulation primitive used by tessellated caps.
//! The default implementation wraps the `tess2-rust` port of libtess2 with
//! the even-odd winding rule, so outer and hole contours may be supplied in
//! any orientation.

use glam::DVec2;
use tess2_rust::tess::TESS_UNDEF;
use tess2_rust::{ElementType, TessOption, Tessellator, WindingRule};
use tracing::warn;

/// Output of a triangulation.
///
/// Indices refer to `vertices`; `None` marks an unresolved corner and the
/// whole triangle must be skipped by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub vertices: Vec<DVec2>,
    pub triangles: Vec<[Option<usize>; 3]>,
}

impl Triangulation {
    /// Triangles whose three indices resolve to existing vertices.
    pub fn resolved_triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let n = self.vertices.len();
        self.triangles.iter().filter_map(move |t| match *t {
            [Some(a), Some(b), Some(c)] if a < n && b < n && c < n => Some([a, b, c]),
            _ => None,
        })
    }
}

/// Triangulates multi-contour planar regions.
pub trait Triangulator {
    /// Triangulates the region bounded by `contours` under the even-odd rule.
    fn triangulate(&self, contours: &[Vec<DVec2>]) -> Triangulation;
}

/// libtess2-based triangulator.
#[derive(Debug, Clone, Copy)]
pub struct Tess2Triangulator {
    /// Run the constrained Delaunay refinement pass on the output.
    pub delaunay: bool,
}

impl Default for Tess2Triangulator {
    fn default() -> Self {
        Self { delaunay: true }
    }
}

impl Triangulator for Tess2Triangulator {
    fn triangulate(&self, contours: &[Vec<DVec2>]) -> Triangulation {
        let mut tess = Tessellator::new();
        tess.set_option(TessOption::ConstrainedDelaunayTriangulation, self.delaunay);

        // Input order is kept so output vertices can be traced back to the
        // exact f64 coordinates they came from.
        let mut originals: Vec<DVec2> = Vec::new();
        for contour in contours.iter().filter(|c| c.len() >= 3) {
            let flat: Vec<f64> = contour
                .iter()
                .flat_map(|p| [p.x, p.y])
                .collect();
            tess.add_contour(2, &flat);
            originals.extend_from_slice(contour);
        }
        if originals.is_empty() {
            return Triangulation::default();
        }

        let ok = tess.tessellate(
            WindingRule::Odd,
            ElementType::Polygons,
            3,
            2,
            Some([0.0, 0.0, 1.0]),
        );
        if !ok {
            warn!(status = ?tess.get_status(), "triangulation failed");
            return Triangulation::default();
        }

        let coords = tess.vertices();
        let vertices = tess
            .vertex_indices()
            .iter()
            .enumerate()
            .map(|(i, &source)| match originals.get(source as usize) {
                Some(original) if source != TESS_UNDEF => *original,
                _ => DVec2::new(coords[i * 2] as f64, coords[i * 2 + 1] as f64),
            })
            .collect();

        let resolve = |index: u32| (index != TESS_UNDEF).then_some(index as usize);
        let triangles = tess
            .elements()
            .chunks_exact(3)
            .map(|t| [resolve(t[0]), resolve(t[1]), resolve(t[2])])
            .collect();

        Triangulation {
            vertices,
            triangles,
        }
    }
}
