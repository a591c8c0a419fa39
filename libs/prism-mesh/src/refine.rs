//! # Refinement Policy
//!
//! Decides where a finer target edge length applies: within a band of the
//! hole boundaries of the capped region, or within a band of the XY
//! projection of auxiliary segments.

use crate::geometry::{Polygon2D, Segment2D};
use crate::options::{MesherOptions, Refinement};
use glam::DVec2;

/// One proximity rule: a feature set, its band and its finer length.
#[derive(Debug, Clone)]
struct Band {
    target_edge_length: f64,
    width: f64,
    segments: Vec<Segment2D>,
}

impl Band {
    /// Builds the band only if it can refine anything.
    fn active(refinement: Option<Refinement>, base: f64, segments: Vec<Segment2D>) -> Option<Self> {
        let refinement = refinement?;
        let refines = refinement.band > 0.0
            && refinement.target_edge_length < base
            && !segments.is_empty();
        refines.then_some(Self {
            target_edge_length: refinement.target_edge_length,
            width: refinement.band,
            segments,
        })
    }

    fn contains(&self, p: DVec2) -> bool {
        self.segments
            .iter()
            .any(|s| s.distance_to(p) <= self.width)
    }
}

/// Combined near-hole and near-segment policy for one cap region.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::Polygon2D;
/// use prism_mesh::options::{MesherOptions, Refinement};
/// use prism_mesh::refine::RefinementPolicy;
/// use glam::DVec2;
///
/// let hole = Polygon2D::rectangle(DVec2::splat(2.0), DVec2::splat(4.0));
/// let options = MesherOptions {
///     near_hole: Some(Refinement::new(0.5, 1.0)),
///     ..Default::default()
/// };
/// let policy = RefinementPolicy::new(&options, &[hole], &[]);
/// assert!(policy.is_near(DVec2::new(1.5, 3.0)));
/// assert!(!policy.is_near(DVec2::new(8.0, 3.0)));
/// ```
#[derive(Debug, Clone)]
pub struct RefinementPolicy {
    base_length: f64,
    near_hole: Option<Band>,
    near_segment: Option<Band>,
}

impl RefinementPolicy {
    /// Builds the policy from the options, the holes of the capped region
    /// and the projected auxiliary segments.
    pub fn new(options: &MesherOptions, holes: &[Polygon2D], aux_segments: &[Segment2D]) -> Self {
        let base = options.target_edge_length_xy;
        let hole_edges = holes
            .iter()
            .flat_map(|h| h.edges().map(|(a, b)| Segment2D::new(a, b)))
            .collect();
        Self {
            base_length: base,
            near_hole: Band::active(options.near_hole, base, hole_edges),
            near_segment: Band::active(options.near_segment, base, aux_segments.to_vec()),
        }
    }

    /// A policy that never refines.
    pub fn inactive(base_length: f64) -> Self {
        Self {
            base_length,
            near_hole: None,
            near_segment: None,
        }
    }

    /// True if at least one band can refine.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.near_hole.is_some() || self.near_segment.is_some()
    }

    /// Base XY target edge length.
    #[inline]
    pub fn base_length(&self) -> f64 {
        self.base_length
    }

    /// Within the near-hole band.
    pub fn is_near_hole(&self, p: DVec2) -> bool {
        self.near_hole.as_ref().is_some_and(|b| b.contains(p))
    }

    /// Within the near-segment band.
    pub fn is_near_segment(&self, p: DVec2) -> bool {
        self.near_segment.as_ref().is_some_and(|b| b.contains(p))
    }

    /// Within any active band.
    pub fn is_near(&self, p: DVec2) -> bool {
        self.is_near_hole(p) || self.is_near_segment(p)
    }

    /// Finest length among active bands, if any band is active.
    pub fn fine_length(&self) -> Option<f64> {
        [&self.near_hole, &self.near_segment]
            .into_iter()
            .flatten()
            .map(|b| b.target_edge_length)
            .reduce(f64::min)
    }

    /// Target length to use at `p`: the finest length of the bands
    /// containing it, else the base length.
    pub fn length_at(&self, p: DVec2) -> f64 {
        [&self.near_hole, &self.near_segment]
            .into_iter()
            .flatten()
            .filter(|b| b.contains(p))
            .map(|b| b.target_edge_length)
            .fold(self.base_length, f64::min)
    }
}
