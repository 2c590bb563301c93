//! The scene-graph collaborator: block storage, typed field access and links.
//!
//! The synthesis operations only talk to the scene through the [`SceneGraph`] trait.
//! [`NifScene`] is an in-memory arena implementation of it.

pub use self::block::{BlockCaps, BlockType};
pub use self::enums::EnumTable;
pub use self::field::Field;
pub use self::nif_scene::NifScene;
pub use self::value::{FieldType, Record, Value};

mod block;
mod enums;
mod field;
mod nif_scene;
mod value;

use crate::math::{Real, HAVOK_CONST};

slotmap::new_key_type! {
    /// Stable handle of a block in a scene graph.
    pub struct NodeKey;
}

/// A NIF file version and user version pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NifVersion {
    /// The packed file version, e.g. `0x14020007` for 20.2.0.7.
    pub version: u32,
    /// The user version.
    pub user_version: u32,
}

impl NifVersion {
    /// The oldest file version carrying Havok collision blocks, 10.0.1.0.
    pub const HAVOK_MIN: u32 = 0x0A00_0100;
    /// 20.2.0.7, used by the games storing Havok data in a tenfold unit.
    pub const V20_2_0_7: u32 = 0x1402_0007;

    /// Creates a version pair.
    pub fn new(version: u32, user_version: u32) -> Self {
        Self {
            version,
            user_version,
        }
    }

    /// Whether the version lies in `[min, max]`. A `max` of zero means unbounded.
    pub fn check(&self, min: u32, max: u32) -> bool {
        self.version >= min && (max == 0 || self.version <= max)
    }

    /// The factor converting scene units into Havok units for this version.
    ///
    /// This is `7` for most files and `70` for 20.2.0.7 files with a user version of
    /// at least 12.
    pub fn havok_scale(&self) -> Real {
        let factor = if self.check(Self::V20_2_0_7, Self::V20_2_0_7) && self.user_version >= 12 {
            10.0
        } else {
            1.0
        };

        factor * HAVOK_CONST
    }
}

/// Storage and query operations consumed by the synthesis core.
///
/// Implementors only provide the primitive operations; typed accessors are derived
/// from [`SceneGraph::record`] and [`SceneGraph::record_mut`].
pub trait SceneGraph {
    /// The file version of the scene.
    fn version(&self) -> NifVersion;

    /// The root blocks, in file order.
    fn roots(&self) -> Vec<NodeKey>;

    /// The type of `node`, or `None` if it does not exist.
    fn block_type(&self, node: NodeKey) -> Option<BlockType>;

    /// The fields of `node`.
    fn record(&self, node: NodeKey) -> Option<&Record>;

    /// The fields of `node`, mutably.
    fn record_mut(&mut self, node: NodeKey) -> Option<&mut Record>;

    /// Inserts a new empty block and returns its key.
    fn insert_node(&mut self, kind: BlockType) -> NodeKey;

    /// Removes `node` and every block it owns, nulling links that pointed into the
    /// removed subtree.
    ///
    /// Owned blocks that an owning link from outside the subtree still reaches are
    /// kept.
    fn remove_subtree(&mut self, node: NodeKey);

    /// Sets the link stored in `field` of `node`.
    ///
    /// An owning link makes `node` the parent of `target`, unless `target` already
    /// has a live parent.
    fn link(&mut self, node: NodeKey, field: Field, target: Option<NodeKey>);

    /// Sets the link array stored in `field` of `node`.
    fn set_links(&mut self, node: NodeKey, field: Field, targets: Vec<NodeKey>);

    /// Redirects every link to `from` so it points to `to`. `to` takes over the parent
    /// of `from`.
    fn redirect_links(&mut self, from: NodeKey, to: NodeKey);

    /// The block owning `node`.
    fn parent_of(&self, node: NodeKey) -> Option<NodeKey>;

    /// The numeric value of the option `label` of the enumeration `enum_name`.
    fn enum_option_value(&self, enum_name: &str, label: &str) -> Option<u32>;

    /// Number of blocks in the scene.
    fn block_count(&self) -> usize;

    /// Whether `node` exists and has all the capabilities `caps`.
    fn has_caps(&self, node: NodeKey, caps: BlockCaps) -> bool {
        self.block_type(node).is_some_and(|t| t.has(caps))
    }

    /// Reads `field` of `node` as `T`.
    fn get<T: FieldType>(&self, node: NodeKey, field: Field) -> Option<T> {
        self.record(node)?.get(field)
    }

    /// Reads an array field of `node`, defaulting to an empty array.
    fn get_array<T>(&self, node: NodeKey, field: Field) -> Vec<T>
    where
        Vec<T>: FieldType,
    {
        self.record(node)
            .map(|r| r.get_array(field))
            .unwrap_or_default()
    }

    /// Writes `field` of `node`. Writing to a missing node does nothing.
    fn set<T: FieldType>(&mut self, node: NodeKey, field: Field, value: T) {
        if let Some(r) = self.record_mut(node) {
            r.set(field, value);
        }
    }

    /// Writes an array field of `node`.
    fn set_array<T>(&mut self, node: NodeKey, field: Field, values: Vec<T>)
    where
        Vec<T>: FieldType,
    {
        self.set(node, field, values)
    }

    /// The target of the link in `field` of `node`, if that target still exists.
    fn resolve_link(&self, node: NodeKey, field: Field) -> Option<NodeKey> {
        let target = self.record(node)?.link(field)?;
        self.block_type(target).map(|_| target)
    }

    /// The existing targets of the link array in `field` of `node`.
    fn resolve_links(&self, node: NodeKey, field: Field) -> Vec<NodeKey> {
        self.record(node)
            .map(|r| r.links(field))
            .unwrap_or_default()
            .into_iter()
            .filter(|t| self.block_type(*t).is_some())
            .collect()
    }
}

/// Iterates over the ancestors of `node`, closest first.
///
/// The walk stops at the first block without a parent, and after `block_count` steps
/// so a malformed cyclic graph cannot loop forever.
pub fn ancestors<S: SceneGraph + ?Sized>(scene: &S, node: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
    core::iter::successors(scene.parent_of(node), move |n| scene.parent_of(*n))
        .take(scene.block_count())
}

/// Visits the triangle geometry reachable from `root` along `Children` links,
/// depth-first, in link order.
pub fn tri_geometry_in_traversal_order<S: SceneGraph + ?Sized>(
    scene: &S,
    root: NodeKey,
) -> Vec<NodeKey> {
    let mut found = Vec::new();
    let mut visited = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if visited.contains(&node) {
            continue;
        }
        visited.push(node);

        let children = scene.resolve_links(node, Field::Children);

        for child in children.iter().rev() {
            stack.push(*child);
        }

        if node != root && scene.has_caps(node, BlockCaps::TRI_GEOMETRY) {
            found.push(node);
        }
    }

    found
}
