//! # Triangle Pairing
//!
//! Greedy merging of adjacent triangles into convex quads.
//!
//! ## Algorithm Overview
//!
//! 1. Map every undirected edge to its incident triangles
//! 2. For each interior edge (exactly two triangles) build a candidate quad
//!    from the two apexes and the shared edge, keeping it only if convex
//! 3. Score candidates and drop those below the quality threshold
//! 4. Visit candidates by descending score, accepting each whose triangles
//!    are both still unclaimed
//!
//! This approximates maximum-weight matching on the triangle adjacency
//! graph in O(E log E). It is not globally optimal but fully deterministic.

use super::quality::quad_quality;
use crate::geometry::{is_convex_quad, orientation};
use glam::DVec2;
use std::collections::BTreeMap;

/// A quad formed by merging two triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Indices of the two source triangles
    pub triangles: [usize; 2],
    /// Counter-clockwise vertex indices
    pub corners: [usize; 4],
    /// Quality score in [0, 1]
    pub score: f64,
}

/// Result of pairing one triangulation.
#[derive(Debug, Clone, Default)]
pub struct Pairing {
    /// Accepted quads in acceptance order (descending score)
    pub quads: Vec<Candidate>,
    /// Indices of triangles left unpaired, ascending
    pub unpaired: Vec<usize>,
}

/// Pairs counter-clockwise `triangles` over `vertices` into quads.
///
/// # Example
///
/// ```rust
/// use prism_mesh::ops::cap::pairing::pair_triangles;
/// use glam::DVec2;
///
/// let vertices = [DVec2::ZERO, DVec2::X, DVec2::ONE, DVec2::Y];
/// let triangles = [[0, 1, 2], [0, 2, 3]];
/// let pairing = pair_triangles(&vertices, &triangles, 0.3);
/// assert_eq!(pairing.quads.len(), 1);
/// assert!(pairing.unpaired.is_empty());
/// ```
pub fn pair_triangles(vertices: &[DVec2], triangles: &[[usize; 3]], min_quality: f64) -> Pairing {
    let mut edge_map: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for (t, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            edge_map
                .entry(normalize_edge(tri[k], tri[(k + 1) % 3]))
                .or_default()
                .push(t);
        }
    }

    let mut candidates: Vec<Candidate> = edge_map
        .iter()
        .filter(|(_, incident)| incident.len() == 2)
        .filter_map(|(&edge, incident)| {
            build_candidate(vertices, triangles, edge, [incident[0], incident[1]])
        })
        .filter(|c| c.score >= min_quality)
        .collect();

    // Stable: equal scores keep edge order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut claimed = vec![false; triangles.len()];
    let mut quads = Vec::new();
    for candidate in candidates {
        let [a, b] = candidate.triangles;
        if claimed[a] || claimed[b] {
            continue;
        }
        claimed[a] = true;
        claimed[b] = true;
        quads.push(candidate);
    }

    let unpaired = claimed
        .iter()
        .enumerate()
        .filter(|(_, c)| !**c)
        .map(|(t, _)| t)
        .collect();

    Pairing { quads, unpaired }
}

/// Builds the quad spanning both triangles of `edge`, if one ordering is convex.
fn build_candidate(
    vertices: &[DVec2],
    triangles: &[[usize; 3]],
    edge: (usize, usize),
    pair: [usize; 2],
) -> Option<Candidate> {
    let first = triangles[pair[0]];
    let second = triangles[pair[1]];

    // Rotate the first triangle so it reads (apex, u, v) with uv the shared edge.
    let k = (0..3).find(|&k| first[k] != edge.0 && first[k] != edge.1)?;
    let (p, u, v) = (first[k], first[(k + 1) % 3], first[(k + 2) % 3]);
    let q = *second.iter().find(|&&i| i != edge.0 && i != edge.1)?;

    let orderings = [[p, u, q, v], [p, v, q, u]];
    let mut corners = orderings
        .into_iter()
        .find(|o| is_convex_quad(&o.map(|i| vertices[i])))?;

    let points = corners.map(|i| vertices[i]);
    if orientation(points[0], points[1], points[2]) < 0.0 {
        corners = [corners[0], corners[3], corners[2], corners[1]];
    }

    Some(Candidate {
        triangles: pair,
        corners,
        score: quad_quality(&corners.map(|i| vertices[i])),
    })
}

#[inline]
fn normalize_edge(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
