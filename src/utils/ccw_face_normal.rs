use crate::math::{Point, Vector};

/// Normalizes `v` by dividing it by its length.
///
/// Returns the zero vector when `v` has zero length, so degenerate faces never
/// produce NaN normals.
#[inline]
pub fn normalize_or_zero(v: Vector) -> Vector {
    let len = v.norm();

    if len > 0.0 {
        v / len
    } else {
        Vector::zeros()
    }
}

/// Computes the normal of a counter-clock-wise triangle.
///
/// This is `(b - a) × (c - a)` normalized; a degenerate triangle yields the zero vector.
#[inline]
pub fn ccw_face_normal(pts: [&Point; 3]) -> Vector {
    let ab = *pts[1] - *pts[0];
    let ac = *pts[2] - *pts[0];

    normalize_or_zero(ab.cross(&ac))
}
