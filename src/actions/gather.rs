use crate::error::SynthesisError;
use crate::math::{Point, Real, Vector};
use crate::scene::{self, BlockCaps, BlockType, Field, NifVersion, NodeKey, SceneGraph};
use crate::transformation::{triangulate_strip, MeshBuffers};

/// The vertex data block of the triangle geometry `geometry`.
///
/// Fails unless `geometry` is an `NiTriShape` or `NiTriStrips` of a file recent
/// enough to carry Havok blocks, with a valid `Data` link.
pub fn geometry_data<S: SceneGraph + ?Sized>(
    scene: &S,
    geometry: NodeKey,
) -> Result<NodeKey, SynthesisError> {
    check_version(scene)?;

    if !scene.has_caps(geometry, BlockCaps::TRI_GEOMETRY) {
        return Err(SynthesisError::topology("the block is not triangle geometry"));
    }

    scene
        .resolve_link(geometry, Field::Data)
        .filter(|d| scene.has_caps(*d, BlockCaps::TRI_GEOMETRY_DATA))
        .ok_or_else(|| {
            warn!("no mesh data was found for {:?}", geometry);
            SynthesisError::topology("no mesh data was found")
        })
}

fn check_version<S: SceneGraph + ?Sized>(scene: &S) -> Result<(), SynthesisError> {
    if scene.version().check(NifVersion::HAVOK_MIN, 0) {
        Ok(())
    } else {
        Err(SynthesisError::topology(
            "the file version predates Havok collision",
        ))
    }
}

fn translation<S: SceneGraph + ?Sized>(scene: &S, geometry: NodeKey) -> Vector {
    scene.get(geometry, Field::Translation).unwrap_or_default()
}

fn triangles<S: SceneGraph + ?Sized>(scene: &S, data: NodeKey) -> Vec<[u32; 3]> {
    let tris: Vec<[u16; 3]> = if scene.block_type(data) == Some(BlockType::NiTriStripsData) {
        scene
            .get_array::<Vec<u16>>(data, Field::Points)
            .iter()
            .flat_map(|strip| triangulate_strip(strip))
            .collect()
    } else {
        scene.get_array::<[u16; 3]>(data, Field::Triangles)
    };

    tris.iter().map(|t| t.map(u32::from)).collect()
}

/// The vertices of `geometries`, each offset by the translation of its geometry node.
pub fn gather_hull_points<S: SceneGraph + ?Sized>(
    scene: &S,
    geometries: &[NodeKey],
) -> Result<Vec<Point>, SynthesisError> {
    let mut points = Vec::new();

    for geometry in geometries {
        let data = geometry_data(scene, *geometry)?;
        let offset = translation(scene, *geometry);

        points.extend(
            scene
                .get_array::<Vector>(data, Field::Vertices)
                .into_iter()
                .map(|v| Point::from(v + offset)),
        );
    }

    Ok(points)
}

/// The triangle mesh of `geometries`, appended in order.
///
/// With `apply_scale`, vertices are mapped by `v * Scale + Translation` of their
/// geometry node; otherwise only translated.
pub fn gather_decomposition_mesh<S: SceneGraph + ?Sized>(
    scene: &S,
    geometries: &[NodeKey],
    apply_scale: bool,
) -> Result<MeshBuffers, SynthesisError> {
    let mut mesh = MeshBuffers::new();

    for geometry in geometries {
        let data = geometry_data(scene, *geometry)?;
        let offset = translation(scene, *geometry);
        let scale = if apply_scale {
            scene.get::<Real>(*geometry, Field::Scale).unwrap_or(1.0)
        } else {
            1.0
        };

        let points = scene
            .get_array::<Vector>(data, Field::Vertices)
            .into_iter()
            .map(|v| Point::from(v * scale + offset));
        mesh.append(points, &triangles(scene, data))?;
    }

    Ok(mesh)
}

/// The only root of `scene`, which the combined operations attach to.
pub(super) fn single_root<S: SceneGraph + ?Sized>(scene: &S) -> Result<NodeKey, SynthesisError> {
    let roots = scene.roots();

    match roots.as_slice() {
        [root] => Ok(*root),
        _ => Err(SynthesisError::topology(
            "combined shapes need a scene with exactly one root",
        )),
    }
}

/// The triangle geometry under the single root, in traversal order.
pub(super) fn combined_geometries<S: SceneGraph + ?Sized>(
    scene: &S,
) -> Result<(NodeKey, Vec<NodeKey>), SynthesisError> {
    check_version(scene)?;
    let root = single_root(scene)?;
    let geometries: Vec<_> = scene::tri_geometry_in_traversal_order(scene, root)
        .into_iter()
        .filter(|g| geometry_data(scene, *g).is_ok())
        .collect();

    if geometries.is_empty() {
        return Err(SynthesisError::topology("no mesh data was found"));
    }

    Ok((root, geometries))
}

/// The block the collision object of `geometry` hangs from.
pub(super) fn attachment_parent<S: SceneGraph + ?Sized>(
    scene: &S,
    geometry: NodeKey,
) -> Result<NodeKey, SynthesisError> {
    scene
        .parent_of(geometry)
        .filter(|p| scene.has_caps(*p, BlockCaps::SPATIAL))
        .ok_or_else(|| SynthesisError::topology("the geometry has no parent node"))
}
