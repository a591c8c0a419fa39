//! # Cap Generation Tests
//!
//! Strategy selection, planning and per-elevation emission.

use super::*;
use crate::geometry::orientation;
use crate::options::{MesherOptions, Refinement};
use crate::triangulate::Tess2Triangulator;
use glam::DVec3;

fn build_plan(region: &CapRegion, policy: &RefinementPolicy) -> CapPlan {
    CapPlan::build(region, policy, 0.3, true, &Tess2Triangulator::default()).unwrap()
}

fn rectangle_with_hole() -> CapRegion {
    CapRegion::new(
        Polygon2D::rectangle(DVec2::ZERO, DVec2::new(10.0, 6.0)),
        vec![Polygon2D::rectangle(DVec2::splat(2.0), DVec2::splat(4.0)).reversed()],
    )
}

fn l_shape() -> CapRegion {
    CapRegion::new(
        Polygon2D::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(2.0, 4.0),
            DVec2::new(0.0, 4.0),
        ]),
        Vec::new(),
    )
}

fn normal(v: &[DVec3]) -> DVec3 {
    (v[1] - v[0]).cross(v[2] - v[0])
}

#[test]
fn test_strategy_selection() {
    assert!(matches!(
        CapStrategy::select(&rectangle_with_hole().outline),
        CapStrategy::RectangleGrid { .. }
    ));
    assert_eq!(CapStrategy::select(&l_shape().outline), CapStrategy::Tessellated);

    // Rotated square is not axis-aligned.
    let diamond = Polygon2D::new(vec![
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 1.0),
    ]);
    assert_eq!(CapStrategy::select(&diamond), CapStrategy::Tessellated);
}

#[test]
fn test_grid_plan_excludes_hole() {
    let region = rectangle_with_hole();
    let plan = build_plan(&region, &RefinementPolicy::inactive(1.0));
    assert_eq!(plan.len(), 56);
    for face in plan.faces() {
        assert!(!region.holes[0].contains(face.centroid()));
        assert!(matches!(face, PlanarFace::Quad { kind: QuadKind::Plain, .. }));
    }
}

#[test]
fn test_tessellated_plan_covers_area() {
    let plan = build_plan(&l_shape(), &RefinementPolicy::inactive(1.0));
    assert_eq!(plan.strategy(), CapStrategy::Tessellated);
    let area: f64 = plan
        .faces()
        .iter()
        .map(|f| match f {
            PlanarFace::Quad { corners, .. } => crate::geometry::unsigned_area(corners),
            PlanarFace::Triangle(corners) => crate::geometry::unsigned_area(corners),
        })
        .sum();
    assert!((area - 12.0).abs() < 1e-9);
    for face in plan.faces() {
        if let PlanarFace::Quad { kind, .. } = face {
            let score = match kind {
                QuadKind::Scored(s) => *s,
                other => panic!("unexpected kind {other:?}"),
            };
            assert!((0.3..=1.0).contains(&score));
        }
    }
}

#[test]
fn test_top_faces_up_bottom_faces_down() {
    let plan = build_plan(&l_shape(), &RefinementPolicy::inactive(1.0));
    let mut mesh = Mesh::new();
    plan.emit(2.0, Surface::Top, &mut mesh);
    plan.emit(0.0, Surface::Bottom, &mut mesh);

    for quad in mesh.quads() {
        let n = normal(&quad.vertices);
        match quad.surface {
            Surface::Top => assert!(n.z > 0.0 && quad.vertices[0].z == 2.0),
            Surface::Bottom => assert!(n.z < 0.0 && quad.vertices[0].z == 0.0),
            other => panic!("unexpected surface {other:?}"),
        }
    }
    for tri in mesh.triangles() {
        let n = normal(&tri.vertices);
        match tri.surface {
            Surface::Top => assert!(n.z > 0.0),
            Surface::Bottom => assert!(n.z < 0.0),
            other => panic!("unexpected surface {other:?}"),
        }
    }
}

#[test]
fn test_emit_counts_match_per_elevation() {
    let plan = build_plan(&rectangle_with_hole(), &RefinementPolicy::inactive(1.0));
    let mut mesh = Mesh::new();
    let top = plan.emit(2.0, Surface::Top, &mut mesh);
    let bottom = plan.emit(0.0, Surface::Bottom, &mut mesh);
    let slab = plan.emit(1.0, Surface::Slab(0), &mut mesh);
    assert_eq!(top, bottom);
    assert_eq!(top, slab);
    assert_eq!(mesh.element_count(Surface::Top), mesh.element_count(Surface::Bottom));
}

#[test]
fn test_degenerate_quad_flip_keeps_repeat_last() {
    let face = PlanarFace::degenerate([DVec2::ZERO, DVec2::X, DVec2::Y]);
    let mut mesh = Mesh::new();
    face.emit(0.0, Surface::Bottom, true, &mut mesh);
    let v = mesh.quads()[0].vertices;
    assert_eq!(v[2], v[3]);
    assert!(normal(&v).z < 0.0);
    assert_eq!(mesh.quads()[0].kind, QuadKind::Degenerate);
}

#[test]
fn test_degenerate_centroid_ignores_repeat() {
    let face = PlanarFace::degenerate([DVec2::ZERO, DVec2::new(3.0, 0.0), DVec2::new(0.0, 3.0)]);
    assert_eq!(face.centroid(), DVec2::new(1.0, 1.0));
}

#[test]
fn test_grid_faces_ccw() {
    let plan = build_plan(&rectangle_with_hole(), &RefinementPolicy::inactive(1.0));
    for face in plan.faces() {
        if let PlanarFace::Quad { corners, .. } = face {
            assert!(orientation(corners[0], corners[1], corners[2]) > 0.0);
        }
    }
}

#[test]
fn test_refinement_adds_faces() {
    let region = l_shape();
    let options = MesherOptions {
        near_segment: Some(Refinement::new(0.25, 1.0)),
        ..Default::default()
    };
    let segment = crate::geometry::Segment2D::new(DVec2::new(0.0, 1.0), DVec2::new(4.0, 1.0));
    let refined = RefinementPolicy::new(&options, &region.holes, &[segment]);
    let baseline = build_plan(&region, &RefinementPolicy::inactive(1.0));
    let fine = build_plan(&region, &refined);
    assert!(fine.len() > baseline.len());
}

#[test]
fn test_too_many_cells_propagates() {
    let region = CapRegion::new(Polygon2D::rectangle(DVec2::ZERO, DVec2::splat(1e6)), Vec::new());
    let result = CapPlan::build(
        &region,
        &RefinementPolicy::inactive(1e-3),
        0.3,
        true,
        &Tess2Triangulator::default(),
    );
    assert!(matches!(result, Err(crate::error::MeshError::TooManyCells { .. })));
}
