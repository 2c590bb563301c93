use havokgen::config::{DecompositionSettings, HullSettings, ParameterSource};
use havokgen::math::{Point, Vector, Vector4r};
use havokgen::mopp::{MoppBlob, MoppError, MoppGenerator, MoppProvider};
use havokgen::scene::{BlockType, Field, NifScene, NifVersion, NodeKey, SceneGraph};
use havokgen::transformation::{ConvexDecomposition, DecompositionParams, MeshBuffers, RawHull};
use havokgen::SynthesisError;
use core::cell::RefCell;

pub const SKYRIM: NifVersion = NifVersion {
    version: 0x1402_0007,
    user_version: 12,
};
pub const OBLIVION: NifVersion = NifVersion {
    version: 0x1400_0005,
    user_version: 11,
};

pub fn unit_cube() -> Vec<Vector> {
    let mut pts = Vec::new();
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                pts.push(Vector::new(x, y, z));
            }
        }
    }
    pts
}

/// A closed box from `min` to `max`, with outward-facing triangles indexing from `base`.
pub fn box_mesh(min: Vector, max: Vector, base: u16) -> (Vec<Vector>, Vec<[u16; 3]>) {
    let vertices = unit_cube()
        .into_iter()
        .map(|c| min + (max - min).component_mul(&c))
        .collect();
    let triangles = [
        [0, 1, 3],
        [0, 3, 2],
        [4, 7, 5],
        [4, 6, 7],
        [0, 4, 5],
        [0, 5, 1],
        [2, 3, 7],
        [2, 7, 6],
        [0, 2, 6],
        [0, 6, 4],
        [1, 5, 7],
        [1, 7, 3],
    ]
    .iter()
    .map(|t: &[u16; 3]| t.map(|i| i + base))
    .collect();

    (vertices, triangles)
}

/// Adds an `NiTriShape` with its data under `parent`.
pub fn add_tri_shape(
    scene: &mut NifScene,
    parent: NodeKey,
    vertices: Vec<Vector>,
    triangles: Vec<[u16; 3]>,
) -> NodeKey {
    let shape = scene.insert_node(BlockType::NiTriShape);
    let data = scene.insert_node(BlockType::NiTriShapeData);
    scene.set_array(data, Field::Vertices, vertices);
    scene.set_array(data, Field::Triangles, triangles);
    scene.link(shape, Field::Data, Some(data));

    let mut children = scene.resolve_links(parent, Field::Children);
    children.push(shape);
    scene.set_links(parent, Field::Children, children);
    shape
}

/// A root node with a single unit cube.
pub fn cube_scene(version: NifVersion) -> (NifScene, NodeKey, NodeKey) {
    let mut scene = NifScene::new(version);
    let root = scene.insert_root(BlockType::NiNode);
    let cube = add_tri_shape(&mut scene, root, unit_cube(), vec![[0, 1, 2]]);
    (scene, root, cube)
}

/// A parameter source with fixed answers. `None` cancels.
pub struct Answers {
    pub hull: Option<HullSettings>,
    pub decomposition: Option<DecompositionSettings>,
}

impl Answers {
    pub fn defaults() -> Self {
        Self {
            hull: Some(HullSettings::default()),
            decomposition: Some(DecompositionSettings::default()),
        }
    }

    pub fn cancel() -> Self {
        Self {
            hull: None,
            decomposition: None,
        }
    }
}

impl ParameterSource for Answers {
    fn hull_settings(&mut self) -> Option<HullSettings> {
        self.hull.clone()
    }

    fn decomposition_settings(&mut self) -> Option<DecompositionSettings> {
        self.decomposition.clone()
    }
}

pub fn tetrahedron(offset: Vector) -> RawHull {
    RawHull {
        points: vec![
            Point::from(offset),
            Point::from(offset + Vector::x() * 7.0),
            Point::from(offset + Vector::y() * 7.0),
            Point::from(offset + Vector::z() * 7.0),
        ],
        triangles: vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    }
}

/// A decomposition backend answering with `count` tetrahedra 10 units apart, or
/// failing when `fail` is set. The last input mesh is recorded.
#[derive(Default)]
pub struct FixedDecomposition {
    pub count: usize,
    pub fail: bool,
    pub seen: RefCell<Option<MeshBuffers>>,
}

impl FixedDecomposition {
    pub fn hulls(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl ConvexDecomposition for FixedDecomposition {
    fn decompose(
        &self,
        mesh: &MeshBuffers,
        _: &DecompositionParams,
    ) -> Result<Vec<RawHull>, SynthesisError> {
        *self.seen.borrow_mut() = Some(mesh.clone());

        if self.fail {
            return Err(SynthesisError::LibraryFailure("backend failed".to_string()));
        }

        Ok((0..self.count)
            .map(|i| tetrahedron(Vector::x() * (10.0 * i as f32)))
            .collect())
    }
}

/// A MOPP provider recording every call.
#[derive(Default)]
pub struct RecordingMopp {
    pub opened: RefCell<usize>,
    pub batches: RefCell<Vec<Vec<Vector4r>>>,
    pub computed: RefCell<usize>,
    pub closed: RefCell<usize>,
    pub empty_code: bool,
}

struct RecordingSession<'a>(&'a RecordingMopp);

impl MoppGenerator for RecordingSession<'_> {
    fn add_vertices(&mut self, vertices: &[Vector4r]) -> Result<(), MoppError> {
        self.0.batches.borrow_mut().push(vertices.to_vec());
        Ok(())
    }

    fn compute(&mut self) -> Result<MoppBlob, MoppError> {
        *self.0.computed.borrow_mut() += 1;
        let code = if self.0.empty_code {
            Vec::new()
        } else {
            vec![0x27, 0x00, 0x01]
        };

        Ok(MoppBlob {
            origin: Vector::new(-1.0, -1.0, -1.0),
            scale: 2.5,
            code,
        })
    }

    fn close(&mut self) {
        *self.0.closed.borrow_mut() += 1;
    }
}

impl MoppProvider for RecordingMopp {
    fn open(&self) -> Result<Box<dyn MoppGenerator + '_>, MoppError> {
        *self.opened.borrow_mut() += 1;
        Ok(Box::new(RecordingSession(self)))
    }
}
