//! # Geometry Primitives
//!
//! Planar loops, segments and the small predicates the meshing stages
//! share: signed area, even-odd containment, convexity, corner
//! orthogonality and point-to-segment distance.
//!
//! All coordinates are f64 (`glam::DVec2` / `glam::DVec3`).

use crate::error::{MeshError, MeshResult};
use config::constants::{AREA_EPSILON, MAX_EDGE_SUBDIVISIONS, SEGMENT_LENGTH_GUARD};
use glam::{DVec2, DVec3};
use robust::{orient2d, Coord};
use serde::{Deserialize, Serialize};

// =============================================================================
// POLYGON LOOP
// =============================================================================

/// A closed 2D loop.
///
/// The closing edge from the last point back to the first is implicit; the
/// first point is never repeated at the end. Orientation is significant:
/// footprints and holes are expected to be wound in opposite directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon2D {
    points: Vec<DVec2>,
}

impl Polygon2D {
    /// Creates a loop from its vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism_mesh::geometry::Polygon2D;
    /// use glam::DVec2;
    ///
    /// let triangle = Polygon2D::new(vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(4.0, 0.0),
    ///     DVec2::new(0.0, 3.0),
    /// ]);
    /// assert_eq!(triangle.signed_area(), 6.0);
    /// ```
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Creates a counter-clockwise axis-aligned rectangle.
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::new(vec![
            DVec2::new(min.x, min.y),
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
        ])
    }

    /// Returns the loop vertices.
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the loop has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates the edges `(p[i], p[i+1])`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns the same loop traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Shoelace signed area: positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        self.edges().map(|(a, b)| a.perp_dot(b)).sum::<f64>() * 0.5
    }

    /// Even-odd point containment.
    ///
    /// Points exactly on an edge may land on either side.
    pub fn contains(&self, p: DVec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        self.points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }

    /// Returns the bounds if this loop is exactly an axis-aligned rectangle.
    ///
    /// Four vertices, edges alternating exactly horizontal and vertical,
    /// non-zero extent on both axes. No tolerance is applied.
    pub fn as_axis_aligned_rectangle(&self) -> Option<(DVec2, DVec2)> {
        if self.points.len() != 4 {
            return None;
        }
        let horizontal = |(a, b): (DVec2, DVec2)| a.y == b.y && a.x != b.x;
        let vertical = |(a, b): (DVec2, DVec2)| a.x == b.x && a.y != b.y;
        let edges: Vec<_> = self.edges().collect();
        let starts_horizontal = edges.iter().step_by(2).all(|e| horizontal(*e))
            && edges.iter().skip(1).step_by(2).all(|e| vertical(*e));
        let starts_vertical = edges.iter().step_by(2).all(|e| vertical(*e))
            && edges.iter().skip(1).step_by(2).all(|e| horizontal(*e));
        if starts_horizontal || starts_vertical {
            Some(self.bounds())
        } else {
            None
        }
    }
}

// =============================================================================
// SEGMENTS
// =============================================================================

/// A planar segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment2D {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment2D {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Distance from `p` to the closest point of the segment.
    #[inline]
    pub fn distance_to(&self, p: DVec2) -> f64 {
        distance_to_segment(p, self.start, self.end)
    }
}

/// A segment in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment3D {
    pub start: DVec3,
    pub end: DVec3,
}

impl Segment3D {
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Projection onto the XY plane.
    pub fn projected(&self) -> Segment2D {
        Segment2D::new(self.start.truncate(), self.end.truncate())
    }
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Distance from `p` to segment `ab`.
///
/// The projection parameter is clamped to [0, 1]. The squared length is
/// guarded additively so zero-length segments reduce to point distance
/// without branching.
#[inline]
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let t = ((p - a).dot(ab) / (ab.length_squared() + SEGMENT_LENGTH_GUARD)).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Robust orientation of `c` relative to the directed line `a → b`.
///
/// Positive when `a, b, c` turn counter-clockwise, negative when clockwise,
/// zero when collinear.
#[inline]
pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// True if the four corners turn strictly in the same direction.
///
/// Collinear corners reject the quad.
pub fn is_convex_quad(quad: &[DVec2; 4]) -> bool {
    let turns: [f64; 4] =
        std::array::from_fn(|i| orientation(quad[i], quad[(i + 1) % 4], quad[(i + 2) % 4]));
    turns.iter().all(|t| *t > 0.0) || turns.iter().all(|t| *t < 0.0)
}

/// Unsigned shoelace area of an arbitrary planar polygon.
pub fn unsigned_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        .abs()
        * 0.5
}

/// True if the polygon encloses more than `AREA_EPSILON`.
#[inline]
pub fn has_positive_area(points: &[DVec2]) -> bool {
    unsigned_area(points) > AREA_EPSILON
}

/// Absolute cosine of the angle between the two edges meeting at `corner`.
///
/// Degenerate (zero-length) edges count as fully non-orthogonal.
pub fn corner_abs_cosine(prev: DVec2, corner: DVec2, next: DVec2) -> f64 {
    let a = prev - corner;
    let b = next - corner;
    let denom = a.length() * b.length();
    if denom <= AREA_EPSILON {
        return 1.0;
    }
    (a.dot(b) / denom).abs().min(1.0)
}

// =============================================================================
// SUBDIVISION
// =============================================================================

/// Splits edge `ab` into `ceil(|ab| / target)` equal-parameter pieces.
///
/// Returns the piece boundaries including both endpoints; the endpoints are
/// reproduced bit-exactly so adjacent edges share their corner vertex.
///
/// # Errors
///
/// `TooManySubdivisions` when the edge needs more than
/// `MAX_EDGE_SUBDIVISIONS` pieces.
///
/// # Example
///
/// ```rust
/// use prism_mesh::geometry::subdivide_edge;
/// use glam::DVec2;
///
/// let points = subdivide_edge(DVec2::ZERO, DVec2::new(2.5, 0.0), 1.0).unwrap();
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[3], DVec2::new(2.5, 0.0));
/// ```
pub fn subdivide_edge(a: DVec2, b: DVec2, target: f64) -> MeshResult<Vec<DVec2>> {
    let n = config::constants::segment_count(a.distance(b), target);
    if n > MAX_EDGE_SUBDIVISIONS {
        return Err(MeshError::too_many_subdivisions(
            "edge",
            n,
            MAX_EDGE_SUBDIVISIONS,
        ));
    }
    let mut points = Vec::with_capacity(n + 1);
    for i in 0..n {
        points.push(a.lerp(b, i as f64 / n as f64));
    }
    points.push(b);
    Ok(points)
}
