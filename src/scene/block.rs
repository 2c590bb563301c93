use bitflags::bitflags;

bitflags! {
    /// Capabilities of a block type, queried instead of walking a type hierarchy.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BlockCaps: u8 {
        /// The block is positioned in the scene and carries a local transform.
        const SPATIAL = 1 << 0;
        /// The block is triangle geometry linking to a vertex data block.
        const TRI_GEOMETRY = 1 << 1;
        /// The block stores vertices and triangles (or strips).
        const TRI_GEOMETRY_DATA = 1 << 2;
        /// The block is a Havok rigid body.
        const RIGID_BODY = 1 << 3;
        /// The block is a Havok collision shape.
        const SHAPE = 1 << 4;
        /// The block is a Havok constraint.
        const CONSTRAINT = 1 << 5;
    }
}

/// The block types read or written by the synthesis operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BlockType {
    NiNode,
    NiTriShape,
    NiTriStrips,
    NiTriShapeData,
    NiTriStripsData,
    BhkCollisionObject,
    BhkRigidBody,
    /// A rigid body carrying its own translation and rotation.
    BhkRigidBodyT,
    BhkConvexVerticesShape,
    BhkListShape,
    BhkMoppBvTreeShape,
    BhkNiTriStripsShape,
    BhkPackedNiTriStripsShape,
    HkPackedNiTriStripsData,
    BhkRagdollConstraint,
    BhkLimitedHingeConstraint,
    BhkHingeConstraint,
    BhkPrismaticConstraint,
    BhkMalleableConstraint,
    BhkBreakableConstraint,
    BhkStiffSpringConstraint,
}

impl BlockType {
    /// The block type name as written in NIF files.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::NiNode => "NiNode",
            BlockType::NiTriShape => "NiTriShape",
            BlockType::NiTriStrips => "NiTriStrips",
            BlockType::NiTriShapeData => "NiTriShapeData",
            BlockType::NiTriStripsData => "NiTriStripsData",
            BlockType::BhkCollisionObject => "bhkCollisionObject",
            BlockType::BhkRigidBody => "bhkRigidBody",
            BlockType::BhkRigidBodyT => "bhkRigidBodyT",
            BlockType::BhkConvexVerticesShape => "bhkConvexVerticesShape",
            BlockType::BhkListShape => "bhkListShape",
            BlockType::BhkMoppBvTreeShape => "bhkMoppBvTreeShape",
            BlockType::BhkNiTriStripsShape => "bhkNiTriStripsShape",
            BlockType::BhkPackedNiTriStripsShape => "bhkPackedNiTriStripsShape",
            BlockType::HkPackedNiTriStripsData => "hkPackedNiTriStripsData",
            BlockType::BhkRagdollConstraint => "bhkRagdollConstraint",
            BlockType::BhkLimitedHingeConstraint => "bhkLimitedHingeConstraint",
            BlockType::BhkHingeConstraint => "bhkHingeConstraint",
            BlockType::BhkPrismaticConstraint => "bhkPrismaticConstraint",
            BlockType::BhkMalleableConstraint => "bhkMalleableConstraint",
            BlockType::BhkBreakableConstraint => "bhkBreakableConstraint",
            BlockType::BhkStiffSpringConstraint => "bhkStiffSpringConstraint",
        }
    }

    /// The capabilities of this block type.
    pub fn caps(self) -> BlockCaps {
        match self {
            BlockType::NiNode => BlockCaps::SPATIAL,
            BlockType::NiTriShape | BlockType::NiTriStrips => {
                BlockCaps::SPATIAL | BlockCaps::TRI_GEOMETRY
            }
            BlockType::NiTriShapeData | BlockType::NiTriStripsData => BlockCaps::TRI_GEOMETRY_DATA,
            BlockType::BhkCollisionObject => BlockCaps::empty(),
            BlockType::BhkRigidBody | BlockType::BhkRigidBodyT => BlockCaps::RIGID_BODY,
            BlockType::BhkConvexVerticesShape
            | BlockType::BhkListShape
            | BlockType::BhkMoppBvTreeShape
            | BlockType::BhkNiTriStripsShape
            | BlockType::BhkPackedNiTriStripsShape => BlockCaps::SHAPE,
            BlockType::HkPackedNiTriStripsData => BlockCaps::empty(),
            BlockType::BhkRagdollConstraint
            | BlockType::BhkLimitedHingeConstraint
            | BlockType::BhkHingeConstraint
            | BlockType::BhkPrismaticConstraint
            | BlockType::BhkMalleableConstraint
            | BlockType::BhkBreakableConstraint
            | BlockType::BhkStiffSpringConstraint => BlockCaps::CONSTRAINT,
        }
    }

    /// Shorthand for `self.caps().contains(caps)`.
    #[inline]
    pub fn has(self, caps: BlockCaps) -> bool {
        self.caps().contains(caps)
    }
}
