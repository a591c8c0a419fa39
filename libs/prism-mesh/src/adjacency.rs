//! # Quad Adjacency
//!
//! Edge-based neighbor lookup over the quads of an [`IndexedMesh`], with
//! boundary and non-manifold edge detection.
//!
//! Triangles are not part of the analysis. Non-manifold edges are reported
//! as data; deciding whether they are fatal is up to the caller.

use crate::indexed::IndexedMesh;
use std::collections::BTreeMap;

/// Neighbor table and edge classification of a quad mesh.
///
/// `neighbors[q][k]` is the quad across local edge `k` of quad `q`, where
/// local edge `k` runs from corner `k` to corner `(k + 1) % 4`. `None`
/// marks a boundary, a collapsed edge or a non-manifold edge.
///
/// # Example
///
/// ```rust
/// use prism_mesh::adjacency::MeshAdjacency;
/// use prism_mesh::indexed::IndexedMesh;
/// use glam::DVec3;
///
/// let vertices = vec![DVec3::ZERO; 6];
/// let quads = vec![[0, 1, 2, 3], [1, 4, 5, 2]];
/// let mesh = IndexedMesh::from_parts(vertices, vec![], quads, vec![]);
///
/// let adjacency = MeshAdjacency::build(&mesh);
/// assert_eq!(adjacency.neighbors()[0][1], Some(1));
/// assert_eq!(adjacency.boundary_edges().len(), 6);
/// assert!(adjacency.is_manifold());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshAdjacency {
    neighbors: Vec<[Option<usize>; 4]>,
    boundary_edges: Vec<[u32; 2]>,
    non_manifold_edges: Vec<[u32; 2]>,
}

impl MeshAdjacency {
    /// Analyzes the quads of `mesh`.
    pub fn build(mesh: &IndexedMesh) -> Self {
        // Maps edge (v0, v1), v0 < v1, to its (quad, local edge) incidences.
        let mut edge_to_quads: BTreeMap<[u32; 2], Vec<(usize, usize)>> = BTreeMap::new();
        for (q, quad) in mesh.quads().iter().enumerate() {
            for k in 0..4 {
                let (a, b) = (quad[k], quad[(k + 1) % 4]);
                if a == b {
                    continue;
                }
                edge_to_quads
                    .entry([a.min(b), a.max(b)])
                    .or_default()
                    .push((q, k));
            }
        }

        let mut neighbors = vec![[None; 4]; mesh.quads().len()];
        let mut boundary_edges = Vec::new();
        let mut non_manifold_edges = Vec::new();
        for (edge, incidences) in edge_to_quads {
            match incidences.as_slice() {
                [_] => boundary_edges.push(edge),
                [(qa, ka), (qb, kb)] => {
                    neighbors[*qa][*ka] = Some(*qb);
                    neighbors[*qb][*kb] = Some(*qa);
                }
                _ => non_manifold_edges.push(edge),
            }
        }

        Self {
            neighbors,
            boundary_edges,
            non_manifold_edges,
        }
    }

    /// Per-quad neighbors across each local edge.
    #[inline]
    pub fn neighbors(&self) -> &[[Option<usize>; 4]] {
        &self.neighbors
    }

    /// Edges used by exactly one quad, ascending.
    #[inline]
    pub fn boundary_edges(&self) -> &[[u32; 2]] {
        &self.boundary_edges
    }

    /// Edges used by more than two quads, ascending.
    #[inline]
    pub fn non_manifold_edges(&self) -> &[[u32; 2]] {
        &self.non_manifold_edges
    }

    /// No edge is shared by more than two quads.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edges.is_empty()
    }

    /// Manifold and without boundary edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.is_manifold() && self.boundary_edges.is_empty()
    }
}
