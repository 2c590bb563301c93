/*!
havokgen
========

**havokgen** synthesizes Havok collision data for NIF scene graphs: convex hulls,
multi-hull convex decompositions with optional MOPP acceleration trees, packed
triangle-strip shapes, and constraint frames re-expressed between rigid bodies.

Every operation is a one-shot transform: read mesh or constraint data from a
[`scene::SceneGraph`], compute, then write the resulting blocks back.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![doc(html_root_url = "http://docs.rs/havokgen/0.1.0")]

#[macro_use]
extern crate log;

pub extern crate nalgebra as na;
pub extern crate parry3d;

pub mod actions;
pub mod config;
pub mod constraint;
pub mod error;
pub mod frame;
pub mod mopp;
pub mod scene;
pub mod transformation;
pub mod utils;
pub mod writer;

pub use self::error::SynthesisError;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use na::{Matrix3, Point3, Quaternion, UnitQuaternion, Vector3, Vector4};

    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The point type.
    pub type Point = Point3<Real>;

    /// The vector type.
    pub type Vector = Vector3<Real>;

    /// The homogeneous vector type used by Havok vertex and plane arrays.
    pub type Vector4r = Vector4<Real>;

    /// The rotation matrix type.
    pub type Matrix = Matrix3<Real>;

    /// A triangle as three vertex indices.
    pub type Triangle = [u32; 3];

    /// Conversion factor between NIF scene units and Havok units.
    pub const HAVOK_CONST: Real = 7.0;
}
