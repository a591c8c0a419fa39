//! # Prism Mesh
//!
//! Quad-dominant surface meshing of prismatic structures: a 2D footprint
//! with holes, extruded between two elevations, optionally cut by
//! horizontal slabs and constrained by auxiliary geometry.
//!
//! ## Architecture
//!
//! ```text
//! PrismStructure + MesherOptions → Mesher → Mesh → IndexedMesh → MeshAdjacency
//!                                                      ↓
//!                                                 io::legacy
//! ```
//!
//! ## Algorithms
//!
//! - **Z-levels**: uniform spacing plus forced elevations
//! - **Side faces**: edge subdivision × consecutive Z-level pairs
//! - **Caps**: structured grid for axis-aligned rectangles, otherwise
//!   libtess2 triangulation followed by greedy triangle-to-quad pairing
//! - **Refinement**: finer edge lengths within a band of holes and of
//!   projected auxiliary segments
//! - **Indexing**: exact or epsilon-quantized vertex merging
//!
//! ## Usage
//!
//! ```rust
//! use prism_mesh::{mesh_structure, MeshAdjacency, MesherOptions, Polygon2D, PrismStructure};
//! use glam::DVec2;
//!
//! let structure = PrismStructure::new(
//!     Polygon2D::rectangle(DVec2::ZERO, DVec2::new(10.0, 6.0)),
//!     0.0,
//!     2.0,
//! )
//! .with_holes(vec![Polygon2D::rectangle(DVec2::splat(2.0), DVec2::splat(4.0)).reversed()]);
//!
//! let options = MesherOptions::default();
//! let mesh = mesh_structure(&structure, &options).unwrap();
//! let indexed = mesh.into_indexed(options.epsilon);
//! assert!(MeshAdjacency::build(&indexed).is_manifold());
//! ```

pub mod adjacency;
pub mod error;
pub mod geometry;
pub mod indexed;
pub mod io;
pub mod mesh;
pub mod mesher;
pub mod ops;
pub mod options;
pub mod refine;
pub mod structure;
pub mod triangulate;
pub mod zlevels;

pub use adjacency::MeshAdjacency;
pub use error::{MeshError, MeshResult};
pub use geometry::{Polygon2D, Segment2D, Segment3D};
pub use indexed::IndexedMesh;
pub use mesh::{Mesh, Quad, QuadKind, Surface, Triangle};
pub use mesher::{mesh_batch, mesh_structure, Mesher};
pub use options::{MesherOptions, Refinement};
pub use structure::{ConstraintSegment, InternalSurface, PrismStructure};
pub use triangulate::{Tess2Triangulator, Triangulation, Triangulator};
