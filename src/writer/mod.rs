//! Writes synthesized shapes and rigid-body settings into a scene graph.

use crate::math::{Real, Vector4r};
use crate::mopp::MoppBlob;
use crate::scene::{BlockType, Field, NodeKey, Record, SceneGraph};
use crate::transformation::{ConvexHullResult, HullPiece, PackedStrips};

/// `Unknown 6 Floats` of a convex vertices shape. The negative zeros are what the
/// game expects.
pub const CVS_UNKNOWN_6_FLOATS: [Real; 6] = [0.0, 0.0, -0.0, 0.0, 0.0, -0.0];
/// `Unknown Floats` of a packed strips shape.
pub const PACKED_UNKNOWN_FLOATS: [Real; 9] = [0.0, 0.0, 0.1, 0.0, 1.0, 1.0, 1.0, 1.0, 0.1];
/// `Unknown Floats 2` of a packed strips shape.
pub const PACKED_UNKNOWN_FLOATS_2: [Real; 3] = [1.0, 1.0, 1.0];
/// `Process Contact Callback Delay` of the bodies configured by a decomposition.
pub const NO_CONTACT_CALLBACK_DELAY: u32 = 65535;

/// Writes synthesis results through a mutable borrow of the scene.
pub struct ShapeGraphWriter<'a, S: SceneGraph + ?Sized> {
    scene: &'a mut S,
}

impl<'a, S: SceneGraph + ?Sized> ShapeGraphWriter<'a, S> {
    /// Wraps `scene`.
    pub fn new(scene: &'a mut S) -> Self {
        Self { scene }
    }

    /// Creates a `bhkConvexVerticesShape` from a hull.
    pub fn convex_shape(&mut self, hull: &ConvexHullResult) -> NodeKey {
        self.cvs(hull.vertices.clone(), hull.normals.clone(), hull.collision_radius)
    }

    /// Creates a `bhkConvexVerticesShape` from a decomposition piece.
    pub fn hull_piece(&mut self, piece: &HullPiece, radius: Real) -> NodeKey {
        let cvs = self.cvs(piece.vertices.clone(), piece.normals.clone(), radius);
        self.scene.set(cvs, Field::Material, piece.material);
        cvs
    }

    fn cvs(&mut self, vertices: Vec<Vector4r>, normals: Vec<Vector4r>, radius: Real) -> NodeKey {
        let cvs = self.scene.insert_node(BlockType::BhkConvexVerticesShape);
        self.scene.set_array(cvs, Field::Vertices, vertices);
        self.scene.set_array(cvs, Field::Normals, normals);
        self.scene.set(cvs, Field::Radius, radius);
        self.scene
            .set_array(cvs, Field::Unknown6Floats, CVS_UNKNOWN_6_FLOATS.to_vec());
        cvs
    }

    /// Creates a `bhkListShape` owning `shapes`.
    pub fn list_shape(&mut self, shapes: Vec<NodeKey>, material: u32) -> NodeKey {
        let list = self.scene.insert_node(BlockType::BhkListShape);
        self.scene.set_links(list, Field::SubShapes, shapes);
        self.scene.set(list, Field::Material, material);
        list
    }

    /// Wraps `shape` into a `bhkMoppBvTreeShape` carrying `blob`.
    pub fn mopp_tree(&mut self, shape: NodeKey, blob: MoppBlob) -> NodeKey {
        let tree = self.scene.insert_node(BlockType::BhkMoppBvTreeShape);
        self.scene.link(tree, Field::Shape, Some(shape));
        self.set_enum(
            tree,
            Field::BuildType,
            "MoppDataBuildType",
            "BUILT_WITHOUT_CHUNK_SUBDIVISION",
        );
        self.scene.set(tree, Field::Origin, blob.origin);
        self.scene.set(tree, Field::Scale, blob.scale);
        self.scene.set_array(tree, Field::MoppData, blob.code);
        tree
    }

    /// The collision object of `parent`, created with a back-link if absent.
    pub fn ensure_collision_object(&mut self, parent: NodeKey) -> NodeKey {
        if let Some(object) = self.scene.resolve_link(parent, Field::CollisionObject) {
            return object;
        }

        let object = self.scene.insert_node(BlockType::BhkCollisionObject);
        self.scene.link(parent, Field::CollisionObject, Some(object));
        self.scene.link(object, Field::Target, Some(parent));
        object
    }

    /// The rigid body of `object`, created if absent.
    pub fn ensure_rigid_body(&mut self, object: NodeKey) -> NodeKey {
        if let Some(body) = self.scene.resolve_link(object, Field::Body) {
            return body;
        }

        let body = self.scene.insert_node(BlockType::BhkRigidBody);
        self.scene.link(object, Field::Body, Some(body));
        body
    }

    /// Makes `shape` the shape of `body` and removes the previous shape subtree.
    pub fn replace_shape(&mut self, body: NodeKey, shape: NodeKey) {
        let old = self.scene.resolve_link(body, Field::Shape);
        self.scene.link(body, Field::Shape, Some(shape));

        if let Some(old) = old.filter(|old| *old != shape) {
            self.scene.remove_subtree(old);
        }
    }

    /// Configures `body` as static scenery or as clutter.
    ///
    /// Options missing from the enumeration table of the scene are skipped.
    pub fn configure_body(&mut self, body: NodeKey, treat_as_static: bool) {
        let pick = |fixed: &'static str, moving: &'static str| {
            if treat_as_static {
                fixed
            } else {
                moving
            }
        };

        self.set_enum(body, Field::Layer, "SkyrimLayer", pick("SKYL_STATIC", "SKYL_CLUTTER"));
        self.scene
            .set(body, Field::ProcessContactCallbackDelay, NO_CONTACT_CALLBACK_DELAY);
        self.set_enum(
            body,
            Field::MotionSystem,
            "hkMotionType",
            pick("MO_SYS_FIXED", "MO_SYS_SPHERE_STABILIZED"),
        );
        self.set_enum(
            body,
            Field::QualityType,
            "hkQualityType",
            pick("MO_QUAL_INVALID", "MO_QUAL_MOVING"),
        );
        self.set_enum(
            body,
            Field::SolverDeactivation,
            "hkSolverDeactivation",
            pick("SOLVER_DEACTIVATION_OFF", "SOLVER_DEACTIVATION_LOW"),
        );
    }

    fn set_enum(&mut self, node: NodeKey, field: Field, enum_name: &str, label: &str) {
        match self.scene.enum_option_value(enum_name, label) {
            Some(value) => self.scene.set(node, field, value),
            None => warn!(
                "unknown option {} of {}, {} left unchanged",
                label,
                enum_name,
                field.label()
            ),
        }
    }

    /// Creates a `bhkPackedNiTriStripsShape` and its data from `packed`, copying the
    /// material of `source`.
    pub fn packed_strips_shape(&mut self, source: NodeKey, packed: PackedStrips) -> NodeKey {
        let material = self.scene.get::<u32>(source, Field::Material).unwrap_or(0);
        let shape = self.scene.insert_node(BlockType::BhkPackedNiTriStripsShape);

        let sub_shape = Record::new()
            .with(Field::Layer, 1u32)
            .with(Field::NumVertices, packed.vertices.len() as u32)
            .with(Field::Material, material);
        self.scene.set(shape, Field::SubShapes, vec![sub_shape]);
        self.scene
            .set_array(shape, Field::UnknownFloats, PACKED_UNKNOWN_FLOATS.to_vec());
        self.scene.set(shape, Field::Scale, 1.0 as Real);
        self.scene
            .set_array(shape, Field::UnknownFloats2, PACKED_UNKNOWN_FLOATS_2.to_vec());

        let data = self.scene.insert_node(BlockType::HkPackedNiTriStripsData);
        let triangles = packed
            .triangles
            .iter()
            .map(|t| {
                Record::new()
                    .with(Field::Triangle, t.triangle)
                    .with(Field::Normal, t.normal)
            })
            .collect::<Vec<_>>();
        self.scene.set(data, Field::Triangles, triangles);
        self.scene.set_array(data, Field::Vertices, packed.vertices);
        self.scene.link(shape, Field::Data, Some(data));

        shape
    }
}
