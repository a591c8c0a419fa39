//! # Meshing Pipeline
//!
//! Runs the stages for one structure:
//!
//! ```text
//! validate → Z-levels → side faces → bottom/top caps → slab caps → aux pass-through
//! ```
//!
//! A build is single-threaded and owns its [`Mesh`] until it returns.
//! Independent structures can be meshed in parallel with [`mesh_batch`].

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Surface};
use crate::ops::cap::{CapPlan, CapRegion};
use crate::ops::side::generate_side_faces;
use crate::options::MesherOptions;
use crate::refine::RefinementPolicy;
use crate::structure::PrismStructure;
use crate::triangulate::{Tess2Triangulator, Triangulator};
use crate::zlevels::compute_z_levels;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

static DEFAULT_TRIANGULATOR: Tess2Triangulator = Tess2Triangulator { delaunay: true };

/// Meshes prism structures with one validated set of options.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::Polygon2D;
/// use prism_mesh::mesher::Mesher;
/// use prism_mesh::options::MesherOptions;
/// use prism_mesh::structure::PrismStructure;
/// use glam::DVec2;
///
/// let structure = PrismStructure::new(
///     Polygon2D::rectangle(DVec2::ZERO, DVec2::new(2.0, 1.0)),
///     0.0,
///     1.0,
/// );
/// let options = MesherOptions::default();
/// let mesher = Mesher::new(&options).unwrap();
/// let mesh = mesher.mesh(&structure).unwrap();
/// // 6 side quads, 2 per cap
/// assert_eq!(mesh.quad_count(), 10);
/// ```
#[derive(Clone, Copy)]
pub struct Mesher<'a> {
    options: &'a MesherOptions,
    triangulator: &'a (dyn Triangulator + Sync),
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Mesher<'a> {
    /// Validates `options` and creates a mesher using the libtess2 backend.
    ///
    /// # Errors
    ///
    /// `InvalidOption` naming the first violated constraint.
    pub fn new(options: &'a MesherOptions) -> MeshResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            triangulator: &DEFAULT_TRIANGULATOR,
            cancel: None,
        })
    }

    /// Replaces the triangulation backend of tessellated caps.
    pub fn with_triangulator(mut self, triangulator: &'a (dyn Triangulator + Sync)) -> Self {
        self.triangulator = triangulator;
        self
    }

    /// Aborts builds with `Cancelled` once `flag` is set.
    ///
    /// The flag is polled between stages; a stage in progress runs to its end.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Meshes one structure.
    ///
    /// # Errors
    ///
    /// - `InvalidStructure` if the structure fails validation
    /// - `TooManyCells` if a rectangle cap grid is too large
    /// - `TooManySubdivisions` if an edge or the height splits too finely
    /// - `Cancelled` if the cancel flag was observed
    pub fn mesh(&self, structure: &PrismStructure) -> MeshResult<Mesh> {
        structure.validate()?;
        let options = self.options;

        info!(
            footprint_vertices = structure.footprint.len(),
            holes = structure.holes.len(),
            slabs = structure.internal_surfaces.len(),
            height = structure.height(),
            "Starting prism meshing"
        );

        self.check_cancelled()?;
        let z_levels = compute_z_levels(
            structure,
            options.target_edge_length_z,
            options.epsilon,
        )?;
        debug!(z_levels = z_levels.len(), "Computed Z-levels");

        let aux_segments = structure.projected_aux_segments();
        let policy = RefinementPolicy::new(options, &structure.holes, &aux_segments);
        let mut mesh = Mesh::new();

        self.check_cancelled()?;
        let target_xy = options.target_edge_length_xy;
        let mut side_quads =
            generate_side_faces(&structure.footprint, &z_levels, target_xy, true, &mut mesh)?;
        for hole in &structure.holes {
            side_quads += generate_side_faces(hole, &z_levels, target_xy, false, &mut mesh)?;
        }
        debug!(side_quads, "Generated side faces");

        if options.generate_bottom_cap || options.generate_top_cap {
            let region = CapRegion::new(structure.footprint.clone(), structure.holes.clone());
            let plan = self.plan_cap(&region, &policy, "footprint")?;
            if options.generate_bottom_cap {
                self.check_cancelled()?;
                let faces = plan.emit(structure.base_z, Surface::Bottom, &mut mesh);
                debug!(faces, z = structure.base_z, "Emitted bottom cap");
            }
            if options.generate_top_cap {
                self.check_cancelled()?;
                let faces = plan.emit(structure.top_z, Surface::Top, &mut mesh);
                debug!(faces, z = structure.top_z, "Emitted top cap");
            }
        }

        for (index, slab) in structure.internal_surfaces.iter().enumerate() {
            self.check_cancelled()?;
            let slab_policy = RefinementPolicy::new(options, &slab.holes, &aux_segments);
            let region = CapRegion::new(slab.outline.clone(), slab.holes.clone());
            let plan = self.plan_cap(&region, &slab_policy, "internal surface")?;
            let faces = plan.emit(slab.elevation, Surface::Slab(index), &mut mesh);
            debug!(index, faces, z = slab.elevation, "Emitted slab cap");
        }

        for &point in &structure.aux_points {
            mesh.add_aux_point(point);
        }
        for &segment in &structure.aux_segments {
            mesh.add_aux_segment(segment);
        }

        let (min, max) = mesh.bounding_box();
        info!(
            quads = mesh.quad_count(),
            triangles = mesh.triangle_count(),
            %min,
            %max,
            "Prism meshing complete"
        );
        Ok(mesh)
    }

    fn plan_cap(
        &self,
        region: &CapRegion,
        policy: &RefinementPolicy,
        what: &str,
    ) -> MeshResult<CapPlan> {
        let plan = CapPlan::build(
            region,
            policy,
            self.options.min_cap_quad_quality,
            self.options.output_rejected_cap_triangles,
            self.triangulator,
        )?;
        if plan.is_empty() {
            warn!(region = what, "Cap produced no faces");
        }
        Ok(plan)
    }

    fn check_cancelled(&self) -> MeshResult<()> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(MeshError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Meshes one structure with `options`.
///
/// # Errors
///
/// See [`Mesher::new`] and [`Mesher::mesh`].
pub fn mesh_structure(structure: &PrismStructure, options: &MesherOptions) -> MeshResult<Mesh> {
    Mesher::new(options)?.mesh(structure)
}

/// Meshes independent structures in parallel.
///
/// Results keep the input order. Options are validated once up front.
///
/// # Errors
///
/// The outer error reports invalid options; per-structure failures are
/// returned in place.
pub fn mesh_batch(
    structures: &[PrismStructure],
    options: &MesherOptions,
) -> MeshResult<Vec<MeshResult<Mesh>>> {
    let mesher = Mesher::new(options)?;
    info!(structures = structures.len(), "Starting batch meshing");
    Ok(structures.par_iter().map(|s| mesher.mesh(s)).collect())
}
