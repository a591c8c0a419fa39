//! # Prism Structure
//!
//! Caller-owned description of the prism to mesh: a footprint with holes
//! extruded between two elevations, optional mid-height slabs, Z-forcing
//! constraint segments and auxiliary geometry passed through unchanged.

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Polygon2D, Segment2D, Segment3D};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A horizontal slab inside the prism with its own outline and holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalSurface {
    pub outline: Polygon2D,
    /// Must lie strictly between the prism's base and top elevation.
    pub elevation: f64,
    #[serde(default)]
    pub holes: Vec<Polygon2D>,
}

impl InternalSurface {
    pub fn new(outline: Polygon2D, elevation: f64) -> Self {
        Self {
            outline,
            elevation,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<Polygon2D>) -> Self {
        self.holes = holes;
        self
    }
}

/// A 2D curve that forces a horizontal cut at `forced_z`.
///
/// Constraint segments never bound a cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSegment {
    pub segment: Segment2D,
    pub forced_z: f64,
}

impl ConstraintSegment {
    pub fn new(segment: Segment2D, forced_z: f64) -> Self {
        Self { segment, forced_z }
    }
}

/// Full description of an extruded footprint.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::Polygon2D;
/// use prism_mesh::structure::PrismStructure;
/// use glam::DVec2;
///
/// let footprint = Polygon2D::rectangle(DVec2::ZERO, DVec2::new(10.0, 6.0));
/// let hole = Polygon2D::rectangle(DVec2::splat(2.0), DVec2::splat(4.0)).reversed();
/// let structure = PrismStructure::new(footprint, 0.0, 2.0).with_holes(vec![hole]);
/// assert!(structure.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrismStructure {
    pub footprint: Polygon2D,
    #[serde(default)]
    pub holes: Vec<Polygon2D>,
    pub base_z: f64,
    pub top_z: f64,
    #[serde(default)]
    pub internal_surfaces: Vec<InternalSurface>,
    #[serde(default)]
    pub constraint_segments: Vec<ConstraintSegment>,
    #[serde(default)]
    pub aux_points: Vec<DVec3>,
    #[serde(default)]
    pub aux_segments: Vec<Segment3D>,
}

impl PrismStructure {
    /// Creates a structure with no holes, slabs or auxiliary geometry.
    pub fn new(footprint: Polygon2D, base_z: f64, top_z: f64) -> Self {
        Self {
            footprint,
            holes: Vec::new(),
            base_z,
            top_z,
            internal_surfaces: Vec::new(),
            constraint_segments: Vec::new(),
            aux_points: Vec::new(),
            aux_segments: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<Polygon2D>) -> Self {
        self.holes = holes;
        self
    }

    pub fn with_internal_surface(mut self, surface: InternalSurface) -> Self {
        self.internal_surfaces.push(surface);
        self
    }

    pub fn with_constraint_segment(mut self, segment: ConstraintSegment) -> Self {
        self.constraint_segments.push(segment);
        self
    }

    pub fn with_aux_point(mut self, point: DVec3) -> Self {
        self.aux_points.push(point);
        self
    }

    pub fn with_aux_segment(mut self, segment: Segment3D) -> Self {
        self.aux_segments.push(segment);
        self
    }

    /// Extrusion height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top_z - self.base_z
    }

    /// XY projections of the auxiliary segments.
    pub fn projected_aux_segments(&self) -> Vec<Segment2D> {
        self.aux_segments.iter().map(Segment3D::projected).collect()
    }

    /// Checks elevations and loop sizes.
    ///
    /// Internal surfaces whose elevation is not strictly inside
    /// `(base_z, top_z)` are rejected rather than silently dropped.
    pub fn validate(&self) -> MeshResult<()> {
        if !self.base_z.is_finite() || !self.top_z.is_finite() {
            return Err(MeshError::invalid_structure("base_z and top_z must be finite"));
        }
        if self.base_z >= self.top_z {
            return Err(MeshError::invalid_structure(format!(
                "base_z ({}) must be below top_z ({})",
                self.base_z, self.top_z
            )));
        }
        check_loop("footprint", &self.footprint)?;
        for (i, hole) in self.holes.iter().enumerate() {
            check_loop(&format!("hole {i}"), hole)?;
        }
        for (i, surface) in self.internal_surfaces.iter().enumerate() {
            if !(surface.elevation > self.base_z && surface.elevation < self.top_z) {
                return Err(MeshError::invalid_structure(format!(
                    "internal surface {i} elevation {} is not strictly between {} and {}",
                    surface.elevation, self.base_z, self.top_z
                )));
            }
            check_loop(&format!("internal surface {i} outline"), &surface.outline)?;
            for (j, hole) in surface.holes.iter().enumerate() {
                check_loop(&format!("internal surface {i} hole {j}"), hole)?;
            }
        }
        Ok(())
    }
}

fn check_loop(name: &str, polygon: &Polygon2D) -> MeshResult<()> {
    if polygon.len() < 3 {
        return Err(MeshError::invalid_structure(format!(
            "{name} needs at least 3 vertices, got {}",
            polygon.len()
        )));
    }
    if !polygon.points().iter().all(|p: &DVec2| p.is_finite()) {
        return Err(MeshError::invalid_structure(format!(
            "{name} has non-finite coordinates"
        )));
    }
    Ok(())
}
