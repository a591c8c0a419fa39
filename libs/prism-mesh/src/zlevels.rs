//! # Z-Level Planning
//!
//! Elevations at which the prism is cut horizontally. Side faces span each
//! consecutive pair of levels.

use crate::error::{MeshError, MeshResult};
use crate::structure::PrismStructure;
use config::constants::MAX_Z_DIVISIONS;

/// Computes the ascending list of cut elevations.
///
/// Starts from `base_z` and `top_z`, adds `ceil(height / target_z) - 1`
/// uniformly spaced interior levels, then every forced elevation (constraint
/// segments, auxiliary point and segment endpoint Zs, internal surfaces)
/// lying strictly inside `(base_z + epsilon, top_z - epsilon)`.
///
/// Exact duplicates collapse; distinct values closer than `epsilon` are kept.
///
/// # Errors
///
/// `TooManySubdivisions` when the height needs more than `MAX_Z_DIVISIONS`
/// uniform divisions.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::Polygon2D;
/// use prism_mesh::structure::PrismStructure;
/// use prism_mesh::zlevels::compute_z_levels;
/// use glam::DVec2;
///
/// let s = PrismStructure::new(Polygon2D::rectangle(DVec2::ZERO, DVec2::ONE), 0.0, 2.0);
/// assert_eq!(compute_z_levels(&s, 1.0, 1e-6).unwrap(), vec![0.0, 1.0, 2.0]);
/// ```
pub fn compute_z_levels(
    structure: &PrismStructure,
    target_z: f64,
    epsilon: f64,
) -> MeshResult<Vec<f64>> {
    let base = structure.base_z;
    let top = structure.top_z;
    let height = top - base;

    let divisions = config::constants::segment_count(height, target_z);
    if divisions > MAX_Z_DIVISIONS {
        return Err(MeshError::too_many_subdivisions(
            "z-level",
            divisions,
            MAX_Z_DIVISIONS,
        ));
    }

    let mut levels = vec![base, top];
    let step = height / divisions as f64;
    levels.extend((1..divisions).map(|i| base + step * i as f64));

    let forced = structure
        .constraint_segments
        .iter()
        .map(|c| c.forced_z)
        .chain(structure.aux_points.iter().map(|p| p.z))
        .chain(
            structure
                .aux_segments
                .iter()
                .flat_map(|s| [s.start.z, s.end.z]),
        )
        .chain(structure.internal_surfaces.iter().map(|s| s.elevation));

    levels.extend(forced.filter(|z| *z > base + epsilon && *z < top - epsilon));

    levels.sort_by(f64::total_cmp);
    levels.dedup();
    Ok(levels)
}
