use crate::math::{Point, Real, Vector4r};

/// Converts a point to a Havok vertex by dividing it by `scale`, with a zero `w`.
#[inline]
pub fn homogeneous(pt: &Point, scale: Real) -> Vector4r {
    Vector4r::new(pt.x, pt.y, pt.z, 0.0) / scale
}

/// Rescales a plane `(n, d)` by dividing its distance term only.
///
/// The direction is a unit vector and stays untouched.
#[inline]
pub fn plane_with_scaled_offset(plane: &Vector4r, scale: Real) -> Vector4r {
    Vector4r::new(plane.x, plane.y, plane.z, plane.w / scale)
}
