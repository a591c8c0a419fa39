//! # Cap Generation
//!
//! Horizontal faces closing the prism at the base, the top and each
//! internal surface.
//!
//! ## Strategies
//!
//! - **RectangleGrid**: exact axis-aligned rectangle outlines get a
//!   structured grid of plain quads
//! - **Tessellated**: everything else is triangulated and paired into
//!   scored quads, with leftovers kept as triangles or degenerate quads
//!
//! A [`CapPlan`] holds the planar result and is emitted at any number of
//! elevations; the 2D topology does not depend on Z.

pub mod grid;
pub mod pairing;
pub mod quality;
pub mod tessellate;

#[cfg(test)]
mod tests;

use crate::error::MeshResult;
use crate::geometry::Polygon2D;
use crate::mesh::{Mesh, Quad, QuadKind, Surface, Triangle};
use crate::refine::RefinementPolicy;
use crate::triangulate::Triangulator;
use glam::DVec2;
use tracing::debug;

// =============================================================================
// REGION AND STRATEGY
// =============================================================================

/// The planar area a cap covers.
#[derive(Debug, Clone)]
pub struct CapRegion {
    pub outline: Polygon2D,
    pub holes: Vec<Polygon2D>,
}

impl CapRegion {
    pub fn new(outline: Polygon2D, holes: Vec<Polygon2D>) -> Self {
        Self { outline, holes }
    }
}

/// Cap algorithm, chosen once per region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapStrategy {
    /// Structured grid over the rectangle `[min, max]`
    RectangleGrid { min: DVec2, max: DVec2 },
    /// Triangulation followed by greedy quad pairing
    Tessellated,
}

impl CapStrategy {
    /// Picks the grid for exact axis-aligned rectangles, tessellation otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism_mesh::geometry::Polygon2D;
    /// use prism_mesh::ops::cap::CapStrategy;
    /// use glam::DVec2;
    ///
    /// let rect = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(4.0, 2.0));
    /// assert!(matches!(CapStrategy::select(&rect), CapStrategy::RectangleGrid { .. }));
    ///
    /// let tri = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
    /// assert_eq!(CapStrategy::select(&tri), CapStrategy::Tessellated);
    /// ```
    pub fn select(outline: &Polygon2D) -> Self {
        match outline.as_axis_aligned_rectangle() {
            Some((min, max)) => Self::RectangleGrid { min, max },
            None => Self::Tessellated,
        }
    }
}

// =============================================================================
// PLANAR FACES
// =============================================================================

/// A counter-clockwise face in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanarFace {
    Quad { corners: [DVec2; 4], kind: QuadKind },
    Triangle([DVec2; 3]),
}

impl PlanarFace {
    /// A lone triangle stored as a quad with its last corner repeated.
    pub fn degenerate([a, b, c]: [DVec2; 3]) -> Self {
        Self::Quad {
            corners: [a, b, c, c],
            kind: QuadKind::Degenerate,
        }
    }

    /// Corner centroid, with a degenerate quad's repeat counted once.
    pub fn centroid(&self) -> DVec2 {
        match self {
            Self::Quad {
                corners: [a, b, c, _],
                kind: QuadKind::Degenerate,
            } => (*a + *b + *c) / 3.0,
            Self::Quad { corners, .. } => corners.iter().copied().sum::<DVec2>() / 4.0,
            Self::Triangle(corners) => corners.iter().copied().sum::<DVec2>() / 3.0,
        }
    }

    /// Lifts the face to elevation `z`, reversing winding when `flip` is set.
    fn emit(&self, z: f64, surface: Surface, flip: bool, mesh: &mut Mesh) {
        match *self {
            Self::Quad {
                corners: [a, b, c, _],
                kind: QuadKind::Degenerate,
            } if flip => {
                let [a, b, c] = [a, b, c].map(|p| p.extend(z));
                mesh.add_quad(Quad {
                    vertices: [a, c, b, b],
                    kind: QuadKind::Degenerate,
                    surface,
                });
            }
            Self::Quad { corners, kind } => {
                let [v0, v1, v2, v3] = corners.map(|p| p.extend(z));
                let vertices = if flip {
                    [v0, v3, v2, v1]
                } else {
                    [v0, v1, v2, v3]
                };
                mesh.add_quad(Quad {
                    vertices,
                    kind,
                    surface,
                });
            }
            Self::Triangle(corners) => {
                let [v0, v1, v2] = corners.map(|p| p.extend(z));
                let vertices = if flip { [v0, v2, v1] } else { [v0, v1, v2] };
                mesh.add_triangle(Triangle::new(vertices, surface));
            }
        }
    }
}

// =============================================================================
// CAP PLAN
// =============================================================================

/// Planar cap result, computed once and emitted per elevation.
#[derive(Debug, Clone)]
pub struct CapPlan {
    strategy: CapStrategy,
    faces: Vec<PlanarFace>,
}

impl CapPlan {
    /// Builds the planar faces of `region`.
    ///
    /// # Arguments
    ///
    /// * `region` - Outline and holes to cover
    /// * `policy` - Refinement policy of this region
    /// * `min_quality` - Minimum score for paired quads
    /// * `keep_triangles` - Emit unpaired triangles as triangles
    /// * `triangulator` - Backend for the tessellated path
    ///
    /// # Errors
    ///
    /// `TooManyCells` when the rectangle grid would be too large,
    /// `TooManySubdivisions` when a tessellated contour edge would be.
    pub fn build(
        region: &CapRegion,
        policy: &RefinementPolicy,
        min_quality: f64,
        keep_triangles: bool,
        triangulator: &dyn Triangulator,
    ) -> MeshResult<Self> {
        let strategy = CapStrategy::select(&region.outline);
        let faces = match strategy {
            CapStrategy::RectangleGrid { min, max } => {
                grid::grid_cells(min, max, &region.outline, &region.holes, policy)?
                    .into_iter()
                    .map(|corners| PlanarFace::Quad {
                        corners,
                        kind: QuadKind::Plain,
                    })
                    .collect()
            }
            CapStrategy::Tessellated => tessellate::tessellated_faces(
                region,
                policy,
                min_quality,
                keep_triangles,
                triangulator,
            )?,
        };
        debug!(
            ?strategy,
            faces = faces.len(),
            refined = policy.is_active(),
            "planned cap"
        );
        Ok(Self { strategy, faces })
    }

    #[inline]
    pub fn strategy(&self) -> CapStrategy {
        self.strategy
    }

    #[inline]
    pub fn faces(&self) -> &[PlanarFace] {
        &self.faces
    }

    /// Number of faces emitted per elevation.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Emits every face at elevation `z` and returns the face count.
    ///
    /// Faces point up (+Z) except on [`Surface::Bottom`], where the winding
    /// is reversed so the normal points down and out of the prism.
    pub fn emit(&self, z: f64, surface: Surface, mesh: &mut Mesh) -> usize {
        let flip = surface == Surface::Bottom;
        for face in &self.faces {
            face.emit(z, surface, flip, mesh);
        }
        self.faces.len()
    }
}
