//! Scene-level operations.
//!
//! Each operation reads its input from a [`SceneGraph`], computes every result
//! (including the MOPP tree) and only then writes new blocks. A failure before the
//! writes leaves the scene untouched.
//!
//! [`SceneGraph`]: crate::scene::SceneGraph

pub use self::constraints::{calculate_spring_length, transform_constraint};
pub use self::gather::{gather_decomposition_mesh, gather_hull_points, geometry_data};
pub use self::strips::pack_strips;

mod constraints;
mod convex;
mod decomposition;
mod gather;
mod strips;

use crate::mopp::{MoppProvider, UnavailableMopp};
use crate::scene::NodeKey;
use crate::transformation::{
    ConvexDecomposer, ConvexDecomposition, ConvexHullBuilder, HullAlgorithm, ParryHull, ParryVhacd,
};

/// The enumeration of Havok materials registered by the host.
pub const HAVOK_MATERIAL_ENUM: &str = "SkyrimHavokMaterial";

/// Outcome of the optional MOPP tree of a decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoppStatus {
    /// The decomposition has too few hulls to need a tree.
    NotRequired,
    /// The tree was built and wraps the list shape.
    Built {
        /// Size of the tree code, in bytes.
        code_len: usize,
    },
    /// No generator is available; the list shape is used directly.
    Unavailable(String),
    /// The generator failed; the list shape is used directly.
    Failed(String),
}

/// Result of a single convex hull operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvexShapeReport {
    /// The new `bhkConvexVerticesShape`.
    pub shape: NodeKey,
    /// The rigid body now using the shape.
    pub body: NodeKey,
    /// Number of unique hull vertices written.
    pub num_vertices: usize,
    /// Number of unique face planes written.
    pub num_normals: usize,
}

/// Result of a convex decomposition operation.
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionReport {
    /// The shape linked from the body: the MOPP tree if built, else the list shape.
    pub shape: NodeKey,
    /// The `bhkListShape` holding the hulls.
    pub list: NodeKey,
    /// One `bhkConvexVerticesShape` per hull, in decomposition order.
    pub hulls: Vec<NodeKey>,
    /// The configured rigid body.
    pub body: NodeKey,
    /// What happened to the optional MOPP tree.
    pub mopp: MoppStatus,
}

/// Result of a constraint re-expression.
#[derive(Copy, Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct ConstraintReport {
    pub kind: crate::constraint::ConstraintKind,
    /// The data as written, B side recomputed.
    pub data: crate::constraint::ConstraintFrameData,
}

/// Runs the hull and decomposition operations with a given set of backends.
pub struct ShapeSynthesizer<'m, H = ParryHull, D = ParryVhacd> {
    hull: ConvexHullBuilder<H>,
    decomposer: ConvexDecomposer<D>,
    mopp: &'m dyn MoppProvider,
}

impl Default for ShapeSynthesizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeSynthesizer<'static> {
    /// The `parry3d` backends, without MOPP generator.
    pub fn new() -> Self {
        Self {
            hull: ConvexHullBuilder::new(ParryHull),
            decomposer: ConvexDecomposer::new(ParryVhacd),
            mopp: &UnavailableMopp,
        }
    }
}

impl<'m, H: HullAlgorithm, D: ConvexDecomposition> ShapeSynthesizer<'m, H, D> {
    /// Replaces the hull algorithm.
    pub fn with_hull_algorithm<H2: HullAlgorithm>(
        self,
        algorithm: H2,
    ) -> ShapeSynthesizer<'m, H2, D> {
        ShapeSynthesizer {
            hull: ConvexHullBuilder::new(algorithm),
            decomposer: self.decomposer,
            mopp: self.mopp,
        }
    }

    /// Replaces the decomposition backend.
    pub fn with_decomposition<D2: ConvexDecomposition>(
        self,
        backend: D2,
    ) -> ShapeSynthesizer<'m, H, D2> {
        ShapeSynthesizer {
            hull: self.hull,
            decomposer: ConvexDecomposer::new(backend),
            mopp: self.mopp,
        }
    }

    /// Uses `provider` to build MOPP trees.
    pub fn with_mopp<'n>(self, provider: &'n dyn MoppProvider) -> ShapeSynthesizer<'n, H, D> {
        ShapeSynthesizer {
            hull: self.hull,
            decomposer: self.decomposer,
            mopp: provider,
        }
    }
}
