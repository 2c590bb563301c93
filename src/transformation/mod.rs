//! Geometry transformations: hulls, convex decompositions and triangle strips.

pub use self::decomposition::{
    ConvexDecomposer, ConvexDecomposition, ConvexHullSet, DecompositionParams, FillMethod,
    HullPiece, ParryVhacd, RawHull,
};
pub use self::hull_builder::{
    ConvexHullBuilder, ConvexHullResult, HullAlgorithm, HullPlanes, ParryHull,
};
pub use self::mesh_merge::MeshBuffers;
pub use self::strips::{pack_strips, triangulate_strip, PackedStrips, PackedTriangle, StripsData};

mod decomposition;
mod hull_builder;
mod mesh_merge;
mod strips;
