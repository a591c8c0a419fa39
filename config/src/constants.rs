//! # Configuration Constants
//!
//! Centralized constants for the prism mesher. Defaults for the public
//! `MesherOptions` surface, validation bounds, the cap quad scoring policy
//! and the small numeric guards used by geometry kernels are defined here.
//!
//! ## Categories
//!
//! - **Defaults**: Values used by `MesherOptions::default()`
//! - **Bounds**: Validation ranges for user-supplied options
//! - **Scoring**: Quad quality weights used by greedy triangle pairing
//! - **Precision**: Floating-point guards
//! - **Limits**: Safety bounds against pathological inputs

// =============================================================================
// DEFAULT OPTIONS
// =============================================================================

/// Default target edge length in the XY plane.
///
/// Perimeter edges and cap grids are subdivided so that no sub-edge is
/// longer than this value.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_TARGET_EDGE_LENGTH_XY;
///
/// let edge = 10.0_f64;
/// let segments = (edge / DEFAULT_TARGET_EDGE_LENGTH_XY).ceil() as usize;
/// assert_eq!(segments, 10);
/// ```
pub const DEFAULT_TARGET_EDGE_LENGTH_XY: f64 = 1.0;

/// Default target vertical spacing between Z-levels.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_TARGET_EDGE_LENGTH_Z;
///
/// let height = 3.0_f64;
/// let interior_levels = (height / DEFAULT_TARGET_EDGE_LENGTH_Z).ceil() as usize - 1;
/// assert_eq!(interior_levels, 2);
/// ```
pub const DEFAULT_TARGET_EDGE_LENGTH_Z: f64 = 1.0;

/// Default epsilon for Z-level boundary collapsing and vertex merging.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EPSILON;
///
/// let base_z = 0.0;
/// let forced_z = 5e-7;
/// // Too close to the base level to become its own plane
/// assert!(forced_z <= base_z + DEFAULT_EPSILON);
/// ```
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Default minimum score a paired cap quad must reach to be accepted.
///
/// Candidates scoring below this are left as triangles.
pub const DEFAULT_MIN_CAP_QUAD_QUALITY: f64 = 0.3;

/// Whether unpaired cap triangles are emitted as triangles by default.
///
/// When false they are emitted as degenerate quads instead.
pub const DEFAULT_OUTPUT_REJECTED_CAP_TRIANGLES: bool = true;

// =============================================================================
// VALIDATION BOUNDS
// =============================================================================

/// Smallest accepted target edge length (XY, Z or refined).
///
/// Prevents memory blow-up from near-zero lengths.
///
/// # Example
///
/// ```rust
/// use config::constants::{MIN_TARGET_EDGE_LENGTH, MAX_TARGET_EDGE_LENGTH};
///
/// fn in_range(length: f64) -> bool {
///     length.is_finite() && (MIN_TARGET_EDGE_LENGTH..=MAX_TARGET_EDGE_LENGTH).contains(&length)
/// }
///
/// assert!(in_range(0.25));
/// assert!(!in_range(0.0));
/// assert!(!in_range(f64::INFINITY));
/// ```
pub const MIN_TARGET_EDGE_LENGTH: f64 = 1e-6;

/// Largest accepted target edge length.
pub const MAX_TARGET_EDGE_LENGTH: f64 = 1e6;

/// Largest accepted refinement band width.
pub const MAX_REFINEMENT_BAND: f64 = 1e6;

// =============================================================================
// QUALITY SCORING
// =============================================================================

/// Weight of the aspect-ratio term (min edge / max edge) in the quad score.
///
/// The three weights sum to one, so scores stay in [0, 1].
///
/// # Example
///
/// ```rust
/// use config::constants::{QUALITY_WEIGHT_AREA, QUALITY_WEIGHT_ASPECT, QUALITY_WEIGHT_ORTHO};
///
/// let total = QUALITY_WEIGHT_ASPECT + QUALITY_WEIGHT_ORTHO + QUALITY_WEIGHT_AREA;
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
pub const QUALITY_WEIGHT_ASPECT: f64 = 0.6;

/// Weight of the corner orthogonality term in the quad score.
pub const QUALITY_WEIGHT_ORTHO: f64 = 0.35;

/// Weight of the positive-area term in the quad score.
pub const QUALITY_WEIGHT_AREA: f64 = 0.05;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Shoelace areas at or below this are treated as degenerate.
pub const AREA_EPSILON: f64 = 1e-12;

/// Added to the squared segment length in point-to-segment distance so that
/// zero-length segments need no branch.
pub const SEGMENT_LENGTH_GUARD: f64 = 1e-18;

/// Merge tolerances at or below this select exact vertex keying.
///
/// # Example
///
/// ```rust
/// use config::constants::EXACT_MERGE_FLOOR;
///
/// let epsilon = 0.0;
/// let exact = epsilon <= EXACT_MERGE_FLOOR;
/// assert!(exact);
/// ```
pub const EXACT_MERGE_FLOOR: f64 = 1e-12;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of cells in a single rectangle-fast-path cap grid.
///
/// Safety limit to prevent memory exhaustion from tiny target lengths on
/// large footprints.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_CAP_GRID_CELLS;
///
/// let cells = 100 * 60;
/// assert!(cells < MAX_CAP_GRID_CELLS);
/// ```
pub const MAX_CAP_GRID_CELLS: usize = 10_000_000;

/// Maximum number of pieces a single loop edge may be split into.
///
/// Bounds side-face generation and tessellated cap densification on huge
/// edges or tiny target lengths.
pub const MAX_EDGE_SUBDIVISIONS: usize = 1_000_000;

/// Maximum number of uniform Z-level divisions of one prism.
pub const MAX_Z_DIVISIONS: usize = 1_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Number of equal sub-segments needed so that none exceeds `target`.
///
/// Always at least one.
///
/// # Example
///
/// ```rust
/// use config::constants::segment_count;
///
/// assert_eq!(segment_count(10.0, 1.0), 10);
/// assert_eq!(segment_count(10.5, 1.0), 11);
/// assert_eq!(segment_count(0.2, 1.0), 1);
/// ```
#[inline]
pub fn segment_count(length: f64, target: f64) -> usize {
    ((length / target).ceil() as usize).max(1)
}
