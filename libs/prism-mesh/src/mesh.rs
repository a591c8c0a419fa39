//! # Mesh Accumulator
//!
//! Append-only collection of quads, fallback triangles and pass-through
//! auxiliary geometry produced by one meshing call.
//!
//! The accumulator is exclusively owned by the build that fills it and is
//! handed to the caller by value, so no locking is involved.

use crate::geometry::Segment3D;
use crate::indexed::IndexedMesh;
use glam::DVec3;

/// Which part of the prism a face belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Vertical face along a footprint or hole loop
    Side,
    /// Cap at `base_z`
    Bottom,
    /// Cap at `top_z`
    Top,
    /// Cap of the internal surface with this index
    Slab(usize),
}

impl Surface {
    /// True for horizontal faces.
    #[inline]
    pub fn is_cap(&self) -> bool {
        !matches!(self, Surface::Side)
    }
}

/// How a quad was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadKind {
    /// Side quads and rectangle-grid cap quads
    Plain,
    /// Paired from two cap triangles, with its quality score in [0, 1]
    Scored(f64),
    /// A lone cap triangle stored as a quad with its last vertex repeated
    Degenerate,
}

/// Four consistently wound corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [DVec3; 4],
    pub kind: QuadKind,
    pub surface: Surface,
}

impl Quad {
    /// Creates an unscored quad.
    pub fn plain(vertices: [DVec3; 4], surface: Surface) -> Self {
        Self {
            vertices,
            kind: QuadKind::Plain,
            surface,
        }
    }

    /// Quality score, present only for paired cap quads.
    #[inline]
    pub fn quality(&self) -> Option<f64> {
        match self.kind {
            QuadKind::Scored(score) => Some(score),
            _ => None,
        }
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().copied().sum::<DVec3>() / 4.0
    }
}

/// Three corners of a cap triangle that could not be paired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
    pub surface: Surface,
}

impl Triangle {
    pub fn new(vertices: [DVec3; 3], surface: Surface) -> Self {
        Self { vertices, surface }
    }

    /// Mean of the three corners.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().copied().sum::<DVec3>() / 3.0
    }
}

/// Accumulated mesh of one meshing call.
///
/// # Example
///
/// ```rust
/// use prism_mesh::mesh::{Mesh, Quad, Surface};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_quad(Quad::plain(
///     [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
///     Surface::Top,
/// ));
/// assert_eq!(mesh.quad_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    quads: Vec<Quad>,
    triangles: Vec<Triangle>,
    aux_points: Vec<DVec3>,
    aux_segments: Vec<Segment3D>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quads.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if no element of any kind was added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
            && self.triangles.is_empty()
            && self.aux_points.is_empty()
            && self.aux_segments.is_empty()
    }

    pub fn add_quad(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_aux_point(&mut self, point: DVec3) {
        self.aux_points.push(point);
    }

    pub fn add_aux_segment(&mut self, segment: Segment3D) {
        self.aux_segments.push(segment);
    }

    #[inline]
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn aux_points(&self) -> &[DVec3] {
        &self.aux_points
    }

    #[inline]
    pub fn aux_segments(&self) -> &[Segment3D] {
        &self.aux_segments
    }

    /// Quads and triangles tagged with `surface`.
    pub fn element_count(&self, surface: Surface) -> usize {
        self.quads.iter().filter(|q| q.surface == surface).count()
            + self.triangles.iter().filter(|t| t.surface == surface).count()
    }

    /// Axis-aligned bounds over quads and triangles.
    ///
    /// Returns (min, max) corners, or zeros for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut corners = self
            .quads
            .iter()
            .flat_map(|q| q.vertices)
            .chain(self.triangles.iter().flat_map(|t| t.vertices));
        let Some(first) = corners.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        corners.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Builds the indexed form, consuming the accumulator.
    pub fn into_indexed(self, epsilon: f64) -> IndexedMesh {
        IndexedMesh::build(&self, epsilon)
    }
}
