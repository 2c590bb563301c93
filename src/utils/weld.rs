use crate::math::{Point, Real};

/// Merges points lying closer than `tolerance` to an earlier point.
///
/// The first point of every cluster is kept; a non-positive tolerance only removes
/// exact duplicates.
pub fn weld_points(points: &[Point], tolerance: Real) -> Vec<Point> {
    let tol2 = tolerance * tolerance;
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());

    for pt in points {
        let merged = kept.iter().any(|k| {
            if tolerance > 0.0 {
                na::distance_squared(k, pt) < tol2
            } else {
                k == pt
            }
        });

        if !merged {
            kept.push(*pt);
        }
    }

    kept
}
