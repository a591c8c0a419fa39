//! # Indexed Mesh
//!
//! Vertex-deduplicated form of a [`Mesh`] for exporters and adjacency
//! analysis.
//!
//! ## Merge Modes
//!
//! - **Exact** (`epsilon <= EXACT_MERGE_FLOOR`): vertices merge only when
//!   bit-identical, with `-0.0` treated as `0.0`
//! - **Quantized**: each coordinate is keyed by `round(c / epsilon)`; two
//!   points within `epsilon` of each other can still straddle a cell
//!   boundary and stay distinct
//!
//! Vertex and edge order is first-seen order over quads, triangles,
//! auxiliary points and auxiliary segments, so the result is deterministic.

use crate::mesh::Mesh;
use config::constants::EXACT_MERGE_FLOOR;
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// Hash key of a vertex under the active merge mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VertexKey {
    Exact([u64; 3]),
    Quantized([i64; 3]),
}

impl VertexKey {
    fn of(p: DVec3, epsilon: f64) -> Self {
        if epsilon <= EXACT_MERGE_FLOOR {
            // Adding 0.0 maps -0.0 to +0.0.
            Self::Exact(p.to_array().map(|c| (c + 0.0).to_bits()))
        } else {
            Self::Quantized(p.to_array().map(|c| (c / epsilon).round() as i64))
        }
    }
}

/// Deduplicating builder state.
struct Indexer {
    epsilon: f64,
    lookup: HashMap<VertexKey, u32>,
    vertices: Vec<DVec3>,
    edge_set: HashSet<[u32; 2]>,
    edges: Vec<[u32; 2]>,
}

impl Indexer {
    fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            lookup: HashMap::new(),
            vertices: Vec::new(),
            edge_set: HashSet::new(),
            edges: Vec::new(),
        }
    }

    fn vertex(&mut self, p: DVec3) -> u32 {
        let key = VertexKey::of(p, self.epsilon);
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.vertices.len() as u32;
        self.vertices.push(p);
        self.lookup.insert(key, index);
        index
    }

    fn edge(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let edge = [a.min(b), a.max(b)];
        if self.edge_set.insert(edge) {
            self.edges.push(edge);
        }
    }

    fn face<const N: usize>(&mut self, corners: &[DVec3; N]) -> [u32; N] {
        let indices = corners.map(|p| self.vertex(p));
        for i in 0..N {
            self.edge(indices[i], indices[(i + 1) % N]);
        }
        indices
    }
}

/// Deduplicated vertices with index-based edges, quads and triangles.
///
/// # Example
///
/// ```rust
/// use prism_mesh::mesh::{Mesh, Quad, Surface};
/// use prism_mesh::indexed::IndexedMesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
/// let b = [DVec3::X, DVec3::new(2.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)];
/// mesh.add_quad(Quad::plain(a, Surface::Top));
/// mesh.add_quad(Quad::plain(b, Surface::Top));
///
/// let indexed = IndexedMesh::build(&mesh, 1e-6);
/// assert_eq!(indexed.vertex_count(), 6);
/// assert_eq!(indexed.edges().len(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    vertices: Vec<DVec3>,
    edges: Vec<[u32; 2]>,
    quads: Vec<[u32; 4]>,
    triangles: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Indexes `mesh`, merging vertices under `epsilon`.
    pub fn build(mesh: &Mesh, epsilon: f64) -> Self {
        let mut indexer = Indexer::new(epsilon);

        let quads = mesh
            .quads()
            .iter()
            .map(|q| indexer.face(&q.vertices))
            .collect();
        let triangles = mesh
            .triangles()
            .iter()
            .map(|t| indexer.face(&t.vertices))
            .collect();
        for &p in mesh.aux_points() {
            indexer.vertex(p);
        }
        for segment in mesh.aux_segments() {
            let a = indexer.vertex(segment.start);
            let b = indexer.vertex(segment.end);
            indexer.edge(a, b);
        }

        Self {
            vertices: indexer.vertices,
            edges: indexer.edges,
            quads,
            triangles,
        }
    }

    /// Assembles an indexed mesh from already indexed parts.
    ///
    /// Used by readers; the parts are taken as given.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        edges: Vec<[u32; 2]>,
        quads: Vec<[u32; 4]>,
        triangles: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            vertices,
            edges,
            quads,
            triangles,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    #[inline]
    pub fn quads(&self) -> &[[u32; 4]] {
        &self.quads
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True when every quad, triangle and edge index is in range.
    pub fn indices_valid(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.quads
            .iter()
            .flatten()
            .chain(self.triangles.iter().flatten())
            .chain(self.edges.iter().flatten())
            .all(|&i| i < n)
    }
}
