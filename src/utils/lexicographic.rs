use crate::math::Vector4r;
use core::cmp::Ordering;
use ordered_float::OrderedFloat;

#[inline]
fn key(v: &Vector4r) -> [OrderedFloat<f32>; 4] {
    [
        OrderedFloat(v.x),
        OrderedFloat(v.y),
        OrderedFloat(v.z),
        OrderedFloat(v.w),
    ]
}

/// Total lexicographic order over `(x, y, z, w)`.
///
/// Components compare with IEEE equality, so `-0.0` and `0.0` are equal. NaN sorts
/// after every other value.
#[inline]
pub fn lex_cmp(a: &Vector4r, b: &Vector4r) -> Ordering {
    key(a).cmp(&key(b))
}

/// Sorts `values` lexicographically and removes exact duplicates.
///
/// Equality is exact floating-point equality: two vectors differing only in their last
/// bit are both kept. Of equal vectors, the first occurrence is kept.
pub fn sorted_unique(values: &[Vector4r]) -> Vec<Vector4r> {
    let mut unique = values.to_vec();
    unique.sort_by(lex_cmp);
    unique.dedup_by(|v, kept| v == kept);
    unique
}
