use crate::common::{
    add_tri_shape, box_mesh, cube_scene, unit_cube, Answers, FixedDecomposition, RecordingMopp,
    OBLIVION,
};
use havokgen::actions::{gather_decomposition_mesh, MoppStatus, ShapeSynthesizer};
use havokgen::config::DecompositionSettings;
use havokgen::math::{Point, Real, Vector, Vector4r};
use havokgen::scene::{BlockType, Field, NifScene, NodeKey, SceneGraph};
use havokgen::SynthesisError;

#[test]
fn four_hulls_never_open_the_mopp_generator() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    let mopp = RecordingMopp::default();
    let synthesizer = ShapeSynthesizer::new()
        .with_decomposition(FixedDecomposition::hulls(4))
        .with_mopp(&mopp);

    let report = synthesizer
        .create_convex_decomposition(&mut scene, cube, &mut Answers::defaults())
        .unwrap();

    assert_eq!(report.mopp, MoppStatus::NotRequired);
    assert_eq!(*mopp.opened.borrow(), 0);
    assert_eq!(report.shape, report.list);
    assert_eq!(scene.block_type(report.list), Some(BlockType::BhkListShape));
    assert_eq!(scene.resolve_links(report.list, Field::SubShapes), report.hulls);
}

#[test]
fn five_hulls_feed_every_batch_to_one_mopp_session() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    let mopp = RecordingMopp::default();
    let synthesizer = ShapeSynthesizer::new()
        .with_decomposition(FixedDecomposition::hulls(5))
        .with_mopp(&mopp);

    let report = synthesizer
        .create_convex_decomposition(&mut scene, cube, &mut Answers::defaults())
        .unwrap();

    assert_eq!(report.mopp, MoppStatus::Built { code_len: 3 });
    assert_eq!(*mopp.opened.borrow(), 1);
    assert_eq!(*mopp.computed.borrow(), 1);
    assert_eq!(*mopp.closed.borrow(), 1);

    let batches = mopp.batches.borrow();
    assert_eq!(batches.len(), 5);
    for (batch, hull) in batches.iter().zip(&report.hulls) {
        assert_eq!(batch, &scene.get_array::<Vector4r>(*hull, Field::Vertices));
    }
    assert_eq!(batches[1][0], Vector4r::new(10.0, 0.0, 0.0, 0.0) / 7.0);

    let tree = report.shape;
    assert_eq!(scene.block_type(tree), Some(BlockType::BhkMoppBvTreeShape));
    assert_eq!(scene.resolve_link(tree, Field::Shape), Some(report.list));
    assert_eq!(scene.resolve_link(report.body, Field::Shape), Some(tree));
    assert_eq!(scene.get::<u32>(tree, Field::BuildType), Some(1));
    assert_eq!(scene.get::<Real>(tree, Field::Scale), Some(2.5));
    assert_eq!(
        scene.get::<Vector>(tree, Field::Origin),
        Some(Vector::new(-1.0, -1.0, -1.0))
    );
    assert_eq!(scene.get_array::<u8>(tree, Field::MoppData), vec![0x27, 0x00, 0x01]);
}

#[test]
fn missing_or_failing_mopp_still_writes_the_list_shape() {
    for empty_code in [false, true] {
        let (mut scene, _, cube) = cube_scene(OBLIVION);
        let failing = RecordingMopp {
            empty_code,
            ..Default::default()
        };
        let synthesizer =
            ShapeSynthesizer::new().with_decomposition(FixedDecomposition::hulls(6));
        let synthesizer = if empty_code {
            synthesizer.with_mopp(&failing)
        } else {
            synthesizer
        };

        let report = synthesizer
            .create_convex_decomposition(&mut scene, cube, &mut Answers::defaults())
            .unwrap();

        if empty_code {
            assert!(matches!(report.mopp, MoppStatus::Failed(_)));
            assert_eq!(*failing.closed.borrow(), 1);
        } else {
            assert!(matches!(report.mopp, MoppStatus::Unavailable(_)));
        }
        assert_eq!(report.shape, report.list);
        assert_eq!(scene.resolve_link(report.body, Field::Shape), Some(report.list));
        assert_eq!(scene.resolve_links(report.list, Field::SubShapes).len(), 6);
    }
}

#[test]
fn hulls_carry_material_radius_and_body_settings() {
    let mut scene = NifScene::new(OBLIVION);
    scene
        .enums_mut()
        .register("SkyrimHavokMaterial", &[("SKY_HAV_MAT_STONE", 3_741_512_247)]);
    let root = scene.insert_root(BlockType::NiNode);
    let cube = add_tri_shape(&mut scene, root, unit_cube(), vec![[0, 1, 2]]);

    let mut answers = Answers::defaults();
    if let Some(settings) = answers.decomposition.as_mut() {
        settings.material = "SKY_HAV_MAT_STONE".to_string();
        settings.treat_as_static = true;
    }

    let report = ShapeSynthesizer::new()
        .with_decomposition(FixedDecomposition::hulls(2))
        .create_convex_decomposition(&mut scene, cube, &mut answers)
        .unwrap();

    for hull in &report.hulls {
        assert_eq!(scene.get::<u32>(*hull, Field::Material), Some(3_741_512_247));
        assert_eq!(scene.get::<Real>(*hull, Field::Radius), Some(0.001));
        assert_eq!(scene.get_array::<Vector4r>(*hull, Field::Normals).len(), 4);
    }
    assert_eq!(scene.get::<u32>(report.list, Field::Material), Some(3_741_512_247));
    assert_eq!(scene.get::<u32>(report.body, Field::Layer), Some(1));
    assert_eq!(scene.get::<u32>(report.body, Field::MotionSystem), Some(7));
    assert_eq!(scene.get::<u32>(report.body, Field::QualityType), Some(0));
    assert_eq!(scene.get::<u32>(report.body, Field::SolverDeactivation), Some(1));
    assert_eq!(
        scene.get::<u32>(report.body, Field::ProcessContactCallbackDelay),
        Some(65535)
    );
}

#[test]
fn failures_before_writing_leave_the_scene_untouched() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    let blocks = scene.block_count();

    let failing = ShapeSynthesizer::new().with_decomposition(FixedDecomposition::failing());
    assert!(matches!(
        failing.create_convex_decomposition(&mut scene, cube, &mut Answers::defaults()),
        Err(SynthesisError::LibraryFailure(_))
    ));

    let empty = ShapeSynthesizer::new().with_decomposition(FixedDecomposition::hulls(0));
    assert!(matches!(
        empty.create_convex_decomposition(&mut scene, cube, &mut Answers::defaults()),
        Err(SynthesisError::LibraryFailure(_))
    ));

    let backend = FixedDecomposition::hulls(3);
    let cancelled = ShapeSynthesizer::new().with_decomposition(backend);
    assert_eq!(
        cancelled
            .create_convex_decomposition(&mut scene, cube, &mut Answers::cancel())
            .map(|r| r.hulls.len()),
        Err(SynthesisError::UserCancelled)
    );

    assert_eq!(scene.block_count(), blocks);
}

#[test]
fn single_geometry_is_scaled_then_translated() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    scene.set(cube, Field::Scale, 2.0 as Real);
    scene.set(cube, Field::Translation, Vector::new(0.0, 0.0, 5.0));
    let backend = FixedDecomposition::hulls(1);

    let mesh = gather_decomposition_mesh(&scene, &[cube], true).unwrap();
    assert_eq!(mesh.points[7], Point::new(2.0, 2.0, 7.0));

    let synthesizer = ShapeSynthesizer::new().with_decomposition(backend);
    let _ = synthesizer
        .create_convex_decomposition(&mut scene, cube, &mut Answers::defaults())
        .unwrap();
}

fn two_mesh_scene() -> (NifScene, NodeKey, NodeKey) {
    let mut scene = NifScene::new(OBLIVION);
    let root = scene.insert_root(BlockType::NiNode);
    let a = add_tri_shape(
        &mut scene,
        root,
        vec![Vector::zeros(), Vector::x(), Vector::y()],
        vec![[0, 1, 2]],
    );
    let b = add_tri_shape(&mut scene, root, unit_cube(), vec![[0, 1, 2], [1, 3, 2]]);
    scene.set(b, Field::Translation, Vector::new(0.0, 0.0, 3.0));
    (scene, a, b)
}

#[test]
fn combined_meshes_are_offset_and_rebased() {
    let (mut scene, _, _) = two_mesh_scene();
    let backend = FixedDecomposition::hulls(1);
    let synthesizer = ShapeSynthesizer::new().with_decomposition(&backend);

    let report = synthesizer
        .create_combined_convex_decomposition(&mut scene, &mut Answers::defaults())
        .unwrap();
    assert_eq!(report.hulls.len(), 1);

    let seen = backend.seen.borrow();
    let mesh = seen.as_ref().unwrap();
    assert_eq!(mesh.points.len(), 3 + 8);
    assert_eq!(mesh.triangles.len(), 1 + 2);
    assert!(mesh.triangles[1..].iter().flatten().all(|i| *i >= 3));
    assert_eq!(mesh.points[3], Point::new(0.0, 0.0, 3.0));
}

#[test]
fn combined_operations_need_a_single_root() {
    let (mut scene, _, _) = two_mesh_scene();
    let _ = scene.insert_root(BlockType::NiNode);

    let synthesizer = ShapeSynthesizer::new().with_decomposition(FixedDecomposition::hulls(1));
    assert!(matches!(
        synthesizer.create_combined_convex_decomposition(&mut scene, &mut Answers::defaults()),
        Err(SynthesisError::InvalidTopology(_))
    ));
}

/// An L made of two overlapping boxes, 4 units long each.
fn l_shape_scene() -> (NifScene, NodeKey) {
    let (mut vertices, mut triangles) = box_mesh(Vector::zeros(), Vector::new(4.0, 1.0, 1.0), 0);
    let (v, t) = box_mesh(Vector::zeros(), Vector::new(1.0, 4.0, 1.0), 8);
    vertices.extend(v);
    triangles.extend(t);

    let mut scene = NifScene::new(OBLIVION);
    let root = scene.insert_root(BlockType::NiNode);
    let shape = add_tri_shape(&mut scene, root, vertices, triangles);
    (scene, shape)
}

#[test]
fn vhacd_respects_the_hull_and_vertex_bounds() {
    for max_convex_hulls in [1, 2, 4] {
        let (mut scene, shape) = l_shape_scene();
        let mut answers = Answers::defaults();
        answers.decomposition = Some(DecompositionSettings {
            resolution: 64_000,
            max_convex_hulls,
            max_vertices_per_hull: 8,
            ..Default::default()
        });

        let report = ShapeSynthesizer::new()
            .create_convex_decomposition(&mut scene, shape, &mut answers)
            .unwrap();

        assert!(!report.hulls.is_empty());
        assert!(report.hulls.len() <= max_convex_hulls as usize);
        for hull in &report.hulls {
            let vertices = scene.get_array::<Vector4r>(*hull, Field::Vertices);
            assert!(vertices.len() >= 4 && vertices.len() <= 8);
        }
    }
}

#[test]
fn out_of_range_triangle_indices_write_nothing() {
    let mut scene = NifScene::new(OBLIVION);
    let root = scene.insert_root(BlockType::NiNode);
    let shape = add_tri_shape(&mut scene, root, unit_cube(), vec![[0, 3, 200]]);
    let blocks = scene.block_count();
    let synthesizer = ShapeSynthesizer::new();

    assert!(matches!(
        synthesizer.create_convex_decomposition(&mut scene, shape, &mut Answers::defaults()),
        Err(SynthesisError::InvalidTopology(_))
    ));
    assert!(matches!(
        synthesizer.create_combined_convex_decomposition(&mut scene, &mut Answers::defaults()),
        Err(SynthesisError::InvalidTopology(_))
    ));
    assert_eq!(scene.block_count(), blocks);
}

#[test]
fn out_of_range_settings_write_nothing() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    let blocks = scene.block_count();
    let backend = FixedDecomposition::hulls(2);
    let mut answers = Answers::defaults();
    answers.decomposition = Some(DecompositionSettings {
        resolution: 0,
        ..Default::default()
    });

    let synthesizer = ShapeSynthesizer::new().with_decomposition(&backend);
    assert!(matches!(
        synthesizer.create_convex_decomposition(&mut scene, cube, &mut answers),
        Err(SynthesisError::InvalidParameters(_))
    ));
    assert!(backend.seen.borrow().is_none());
    assert_eq!(scene.block_count(), blocks);
}
