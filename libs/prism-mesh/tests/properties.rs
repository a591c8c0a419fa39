use glam::{DVec2, DVec3};
use prism_mesh::{
    mesh_batch, mesh_structure, InternalSurface, Mesh, MeshAdjacency, MesherOptions, Polygon2D,
    PrismStructure, QuadKind, Refinement, Segment3D, Surface,
};

fn l_shape() -> Polygon2D {
    Polygon2D::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(6.0, 0.0),
        DVec2::new(6.0, 3.0),
        DVec2::new(3.0, 3.0),
        DVec2::new(3.0, 6.0),
        DVec2::new(0.0, 6.0),
    ])
}

fn hexagon_with_hole() -> PrismStructure {
    let outline = Polygon2D::new(
        (0..6)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_3 * i as f64;
                DVec2::new(5.0 + 4.0 * angle.cos(), 5.0 + 4.0 * angle.sin())
            })
            .collect(),
    );
    let hole = Polygon2D::rectangle(DVec2::splat(4.0), DVec2::splat(6.0)).reversed();
    PrismStructure::new(outline, 0.0, 1.5).with_holes(vec![hole])
}

fn cap_count(mesh: &Mesh) -> usize {
    mesh.element_count(Surface::Bottom) + mesh.element_count(Surface::Top)
}

/// Cap density in triangle units: a paired or grid quad counts twice.
fn cap_triangle_units(mesh: &Mesh) -> usize {
    let quads: usize = mesh
        .quads()
        .iter()
        .filter(|q| q.surface.is_cap())
        .map(|q| if q.kind == QuadKind::Degenerate { 1 } else { 2 })
        .sum();
    quads + mesh.triangles().len()
}

#[test]
fn tessellated_footprint_is_manifold() {
    let options = MesherOptions::default();
    for structure in [PrismStructure::new(l_shape(), 0.0, 2.0), hexagon_with_hole()] {
        let mesh = mesh_structure(&structure, &options).unwrap();
        let adjacency = MeshAdjacency::build(&mesh.into_indexed(options.epsilon));
        assert!(adjacency.non_manifold_edges().is_empty());
    }
}

#[test]
fn caps_are_symmetric() {
    let options = MesherOptions::default();
    for structure in [PrismStructure::new(l_shape(), 0.0, 2.0), hexagon_with_hole()] {
        let mesh = mesh_structure(&structure, &options).unwrap();
        assert_eq!(
            mesh.element_count(Surface::Bottom),
            mesh.element_count(Surface::Top)
        );
    }
}

#[test]
fn tessellated_caps_exclude_hole() {
    let structure = hexagon_with_hole();
    let hole = &structure.holes[0];
    let refined = MesherOptions {
        near_hole: Some(Refinement::new(0.5, 1.0)),
        ..Default::default()
    };
    for options in [MesherOptions::default(), refined] {
        let mesh = mesh_structure(&structure, &options).unwrap();
        assert!(cap_count(&mesh) > 0);
        for quad in mesh.quads().iter().filter(|q| q.surface.is_cap()) {
            assert!(!hole.contains(quad.centroid().truncate()));
        }
        for tri in mesh.triangles() {
            assert!(!hole.contains(tri.centroid().truncate()));
        }
    }
}

#[test]
fn near_duplicate_z_levels_are_kept() {
    let structure = PrismStructure::new(l_shape(), 0.0, 2.0)
        .with_aux_point(DVec3::new(1.0, 1.0, 1.0 + 1e-9));
    let options = MesherOptions::default();
    let baseline = mesh_structure(&PrismStructure::new(l_shape(), 0.0, 2.0), &options).unwrap();
    let mesh = mesh_structure(&structure, &options).unwrap();

    // Levels 0, 1, 1 + 1e-9, 2: one extra sliver band of side quads.
    let bands = baseline.element_count(Surface::Side) / 2;
    assert_eq!(mesh.element_count(Surface::Side), bands * 3);
    assert!(mesh
        .quads()
        .iter()
        .filter(|q| q.surface == Surface::Side)
        .any(|q| q.vertices[0].z == 1.0 && q.vertices[3].z == 1.0 + 1e-9));

    // Under the default merge tolerance both sliver rows share vertices.
    let vertex_count = mesh.into_indexed(options.epsilon).vertex_count();
    let exact_count = mesh_structure(&structure, &options)
        .unwrap()
        .into_indexed(0.0)
        .vertex_count();
    assert!(vertex_count < exact_count);
}

#[test]
fn refinement_never_coarsens() {
    let baseline_options = MesherOptions::default();
    let near_hole = MesherOptions {
        near_hole: Some(Refinement::new(0.5, 1.0)),
        ..Default::default()
    };

    let grid = PrismStructure::new(Polygon2D::rectangle(DVec2::ZERO, DVec2::new(10.0, 6.0)), 0.0, 2.0)
        .with_holes(vec![Polygon2D::rectangle(DVec2::splat(2.0), DVec2::splat(4.0)).reversed()]);
    for structure in [grid, hexagon_with_hole()] {
        let baseline = mesh_structure(&structure, &baseline_options).unwrap();
        let refined = mesh_structure(&structure, &near_hole).unwrap();
        assert!(cap_triangle_units(&refined) > cap_triangle_units(&baseline));
    }

    // Segment refinement on a footprint without holes.
    let structure = PrismStructure::new(l_shape(), 0.0, 2.0).with_aux_segment(Segment3D::new(
        DVec3::new(0.0, 1.0, 1.0),
        DVec3::new(6.0, 1.0, 1.0),
    ));
    let near_segment = MesherOptions {
        near_segment: Some(Refinement::new(0.25, 1.0)),
        ..Default::default()
    };
    let baseline = mesh_structure(&structure, &baseline_options).unwrap();
    let refined = mesh_structure(&structure, &near_segment).unwrap();
    assert!(cap_triangle_units(&refined) > cap_triangle_units(&baseline));
}

#[test]
fn refinement_without_nearby_material_is_neutral() {
    let structure = PrismStructure::new(l_shape(), 0.0, 2.0);
    let options = MesherOptions {
        near_hole: Some(Refinement::new(0.5, 1.0)),
        ..Default::default()
    };
    let baseline = mesh_structure(&structure, &MesherOptions::default()).unwrap();
    let refined = mesh_structure(&structure, &options).unwrap();
    assert_eq!(cap_count(&refined), cap_count(&baseline));
}

#[test]
fn indices_are_valid() {
    let options = MesherOptions::default();
    let structure = hexagon_with_hole().with_internal_surface(InternalSurface::new(
        Polygon2D::rectangle(DVec2::new(3.0, 3.0), DVec2::new(7.0, 7.0)),
        0.75,
    ));
    let indexed = mesh_structure(&structure, &options)
        .unwrap()
        .into_indexed(options.epsilon);
    assert!(indexed.indices_valid());
    for quad in indexed.quads() {
        for k in 0..4 {
            assert_ne!(quad[k], quad[(k + 1) % 4]);
        }
    }
    for tri in indexed.triangles() {
        for k in 0..3 {
            assert_ne!(tri[k], tri[(k + 1) % 3]);
        }
    }
}

#[test]
fn quality_scores_in_range() {
    let mesh = mesh_structure(&hexagon_with_hole(), &MesherOptions::default()).unwrap();
    let scores: Vec<f64> = mesh.quads().iter().filter_map(|q| q.quality()).collect();
    assert!(!scores.is_empty());
    for score in scores {
        assert!((0.0..=1.0).contains(&score));
        assert!(score >= MesherOptions::default().min_cap_quad_quality);
    }
}

#[test]
fn strict_quality_threshold_leaves_triangles() {
    let options = MesherOptions {
        min_cap_quad_quality: 1.0,
        ..Default::default()
    };
    let mesh = mesh_structure(&hexagon_with_hole(), &options).unwrap();
    assert!(mesh.triangle_count() > 0);
    assert!(mesh
        .quads()
        .iter()
        .all(|q| !matches!(q.kind, QuadKind::Scored(s) if s < 1.0)));
}

#[test]
fn degenerate_quads_replace_triangles() {
    let structure = hexagon_with_hole();
    let with_triangles = mesh_structure(&structure, &MesherOptions::default()).unwrap();
    let options = MesherOptions {
        output_rejected_cap_triangles: false,
        ..Default::default()
    };
    let degenerate = mesh_structure(&structure, &options).unwrap();
    assert_eq!(degenerate.triangle_count(), 0);
    let count = degenerate
        .quads()
        .iter()
        .filter(|q| q.kind == QuadKind::Degenerate)
        .count();
    assert_eq!(count, with_triangles.triangle_count());
    assert_eq!(cap_count(&degenerate), cap_count(&with_triangles));
}

#[test]
fn batch_matches_sequential() {
    let options = MesherOptions::default();
    let structures = vec![
        PrismStructure::new(l_shape(), 0.0, 2.0),
        hexagon_with_hole(),
        PrismStructure::new(l_shape(), 0.0, 0.0),
    ];
    let results = mesh_batch(&structures, &options).unwrap();
    assert_eq!(results.len(), 3);
    for (structure, result) in structures.iter().zip(&results).take(2) {
        let sequential = mesh_structure(structure, &options).unwrap();
        let parallel = result.as_ref().unwrap();
        assert_eq!(parallel.quad_count(), sequential.quad_count());
        assert_eq!(parallel.triangle_count(), sequential.triangle_count());
    }
    assert!(results[2].is_err());
}
