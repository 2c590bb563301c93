use crate::common::{add_tri_shape, cube_scene, unit_cube, Answers, OBLIVION, SKYRIM};
use havokgen::actions::ShapeSynthesizer;
use havokgen::config::HullSettings;
use havokgen::math::{Real, Vector, Vector4r};
use havokgen::scene::{BlockType, Field, NifScene, NifVersion, NodeKey, SceneGraph};
use havokgen::SynthesisError;

fn cvs_arrays(scene: &NifScene, shape: NodeKey) -> (Vec<Vector4r>, Vec<Vector4r>) {
    (
        scene.get_array(shape, Field::Vertices),
        scene.get_array(shape, Field::Normals),
    )
}

#[test]
fn unit_cube_gives_eight_scaled_vertices_and_six_normals() {
    let (mut scene, root, cube) = cube_scene(OBLIVION);
    let report = ShapeSynthesizer::new()
        .create_convex_shape(&mut scene, cube, &mut Answers::defaults())
        .unwrap();

    let (vertices, normals) = cvs_arrays(&scene, report.shape);
    assert_eq!(vertices.len(), 8);
    assert_eq!(normals.len(), 6);
    assert_eq!(report.num_vertices, 8);
    assert_eq!(report.num_normals, 6);

    assert_eq!(vertices[0], Vector4r::zeros());
    assert_eq!(vertices[7], Vector4r::new(1.0, 1.0, 1.0, 0.0) / 7.0);
    for n in &normals {
        assert_eq!(n.xyz().norm(), 1.0);
        assert!(n.w == 0.0 || n.w == -1.0 / 7.0);
    }

    let object = scene.resolve_link(root, Field::CollisionObject).unwrap();
    assert_eq!(scene.resolve_link(object, Field::Target), Some(root));
    assert_eq!(scene.resolve_link(object, Field::Body), Some(report.body));
    assert_eq!(scene.resolve_link(report.body, Field::Shape), Some(report.shape));
    assert_eq!(scene.get::<Real>(report.shape, Field::Radius), Some(0.05));

    let unknown: Vec<Real> = scene.get_array(report.shape, Field::Unknown6Floats);
    assert!(unknown[2] == 0.0 && unknown[2].is_sign_negative());
    assert!(unknown[5] == 0.0 && unknown[5].is_sign_negative());
}

#[test]
fn hull_output_is_deterministic() {
    let run = || {
        let (mut scene, _, cube) = cube_scene(SKYRIM);
        let report = ShapeSynthesizer::new()
            .create_convex_shape(&mut scene, cube, &mut Answers::defaults())
            .unwrap();
        let (v, n) = cvs_arrays(&scene, report.shape);
        v.iter()
            .chain(&n)
            .flat_map(|x| x.iter().map(|c| c.to_bits()).collect::<Vec<_>>())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn tenfold_scale_applies_to_vertices_and_plane_offsets_only() {
    let (mut scene, _, cube) = cube_scene(SKYRIM);
    let report = ShapeSynthesizer::new()
        .create_convex_shape(&mut scene, cube, &mut Answers::defaults())
        .unwrap();
    let (vertices, normals) = cvs_arrays(&scene, report.shape);

    assert_eq!(vertices[7], Vector4r::new(1.0, 1.0, 1.0, 0.0) / 70.0);
    assert!(normals.contains(&Vector4r::new(1.0, 0.0, 0.0, -1.0 / 70.0)));
}

#[test]
fn duplicated_input_points_appear_once() {
    let mut scene = NifScene::new(OBLIVION);
    let root = scene.insert_root(BlockType::NiNode);
    let mut doubled = unit_cube();
    doubled.extend(unit_cube());
    let cube = add_tri_shape(&mut scene, root, doubled, vec![]);

    let report = ShapeSynthesizer::new()
        .create_convex_shape(&mut scene, cube, &mut Answers::defaults())
        .unwrap();

    assert_eq!(report.num_vertices, 8);
}

#[test]
fn geometry_translation_offsets_the_hull() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    scene.set(cube, Field::Translation, Vector::new(7.0, 0.0, 0.0));

    let report = ShapeSynthesizer::new()
        .create_convex_shape(&mut scene, cube, &mut Answers::defaults())
        .unwrap();
    let (vertices, _) = cvs_arrays(&scene, report.shape);

    assert_eq!(vertices[0], Vector4r::new(1.0, 0.0, 0.0, 0.0));
}

#[test]
fn combined_hull_covers_every_geometry_and_replaces_the_old_shape() {
    let (mut scene, root, _) = cube_scene(OBLIVION);
    let far = add_tri_shape(&mut scene, root, unit_cube(), vec![]);
    scene.set(far, Field::Translation, Vector::new(7.0, 0.0, 0.0));
    let synthesizer = ShapeSynthesizer::new();

    let first = synthesizer
        .create_combined_convex_shape(&mut scene, &mut Answers::defaults())
        .unwrap();
    let second = synthesizer
        .create_combined_convex_shape(&mut scene, &mut Answers::defaults())
        .unwrap();

    let (vertices, _) = cvs_arrays(&scene, second.shape);
    assert_eq!(vertices.first(), Some(&Vector4r::zeros()));
    assert_eq!(vertices.last(), Some(&(Vector4r::new(8.0, 1.0, 1.0, 0.0) / 7.0)));
    assert_eq!(first.body, second.body);
    assert_eq!(scene.block_type(first.shape), None);
}

#[test]
fn cancelled_or_invalid_requests_write_nothing() {
    let (mut scene, root, cube) = cube_scene(OBLIVION);
    let blocks = scene.block_count();
    let synthesizer = ShapeSynthesizer::new();

    assert_eq!(
        synthesizer.create_convex_shape(&mut scene, cube, &mut Answers::cancel()),
        Err(SynthesisError::UserCancelled)
    );
    assert!(matches!(
        synthesizer.create_convex_shape(&mut scene, root, &mut Answers::defaults()),
        Err(SynthesisError::InvalidTopology(_))
    ));
    assert_eq!(scene.block_count(), blocks);
}

#[test]
fn out_of_range_answers_write_nothing() {
    let (mut scene, _, cube) = cube_scene(OBLIVION);
    let blocks = scene.block_count();
    let mut answers = Answers::defaults();
    answers.hull = Some(HullSettings {
        tolerance: 7.0,
        ..Default::default()
    });

    assert!(matches!(
        ShapeSynthesizer::new().create_convex_shape(&mut scene, cube, &mut answers),
        Err(SynthesisError::InvalidParameters(_))
    ));
    assert_eq!(scene.block_count(), blocks);
}

#[test]
fn old_files_are_rejected() {
    let (mut scene, _, cube) = cube_scene(NifVersion::new(0x0400_0002, 0));

    assert!(matches!(
        ShapeSynthesizer::new().create_convex_shape(
            &mut scene,
            cube,
            &mut Answers::defaults()
        ),
        Err(SynthesisError::InvalidTopology(_))
    ));
}
