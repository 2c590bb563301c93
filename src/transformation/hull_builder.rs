use crate::error::SynthesisError;
use crate::math::{Point, Real, Triangle, Vector4r};
use crate::utils::{self, ccw_face_normal};
use parry3d::transformation::try_convex_hull;

/// The raw output of a hull algorithm: vertices and one plane per face.
///
/// Planes are `(n, d)` with a unit outward normal `n` and `n · p + d = 0` for points
/// `p` on the face.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HullPlanes {
    /// The hull vertices.
    pub vertices: Vec<Point>,
    /// The face planes, one per face, possibly repeated.
    pub planes: Vec<Vector4r>,
}

/// A convex-hull algorithm.
pub trait HullAlgorithm {
    /// Computes the hull of `points`, merging vertices closer than `tolerance`.
    fn hull(&self, points: &[Point], tolerance: Real) -> Result<HullPlanes, SynthesisError>;
}

/// Quickhull from `parry3d`.
///
/// The roundoff tolerance is honored by welding hull vertices closer than the
/// tolerance and computing the hull again from the welded set.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParryHull;

impl ParryHull {
    fn faces(points: &[Point]) -> Result<(Vec<Point>, Vec<Triangle>), SynthesisError> {
        let (vertices, faces) = try_convex_hull(points)?;

        if faces.is_empty() {
            return Err(SynthesisError::LibraryFailure(
                "convex hull: the point cloud is flat".to_string(),
            ));
        }

        Ok((vertices, faces))
    }
}

impl HullAlgorithm for ParryHull {
    fn hull(&self, points: &[Point], tolerance: Real) -> Result<HullPlanes, SynthesisError> {
        let unique: Vec<_> = points.iter().map(|p| utils::homogeneous(p, 1.0)).collect();
        let unique: Vec<_> = utils::sorted_unique(&unique)
            .iter()
            .map(|v| Point::from(v.xyz()))
            .collect();
        let (mut vertices, mut faces) = Self::faces(&unique)?;

        if tolerance > 0.0 {
            let welded = utils::weld_points(&vertices, tolerance);

            if welded.len() < vertices.len() && welded.len() >= 4 {
                match Self::faces(&welded) {
                    Ok(rehulled) => (vertices, faces) = rehulled,
                    Err(err) => debug!("keeping the unwelded hull: {}", err),
                }
            }
        }

        let planes = faces
            .iter()
            .map(|f| {
                let a = &vertices[f[0] as usize];
                let n = ccw_face_normal([a, &vertices[f[1] as usize], &vertices[f[2] as usize]]);
                n.push(-n.dot(&a.coords))
            })
            .collect();

        Ok(HullPlanes { vertices, planes })
    }
}

/// The vertices and normals of a `bhkConvexVerticesShape`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexHullResult {
    /// Hull vertices in Havok units, `w = 0`, unique and sorted.
    pub vertices: Vec<Vector4r>,
    /// Face planes with the distance in Havok units, unique and sorted.
    pub normals: Vec<Vector4r>,
    /// The collision radius of the shape.
    pub collision_radius: Real,
}

/// Builds Havok convex shapes from point clouds.
#[derive(Clone, Debug, Default)]
pub struct ConvexHullBuilder<H = ParryHull> {
    algorithm: H,
}

impl<H: HullAlgorithm> ConvexHullBuilder<H> {
    /// A builder using `algorithm`.
    pub fn new(algorithm: H) -> Self {
        Self { algorithm }
    }

    /// Computes the hull of `points` and converts it to Havok units.
    ///
    /// Vertices are divided by `havok_scale`; normals keep their direction and only
    /// get their distance term divided. Both arrays are deduplicated by exact equality
    /// and sorted lexicographically, which makes the output deterministic.
    pub fn build(
        &self,
        points: &[Point],
        tolerance: Real,
        radius: Real,
        havok_scale: Real,
    ) -> Result<ConvexHullResult, SynthesisError> {
        if points.is_empty() {
            return Err(SynthesisError::topology("no mesh data was found"));
        }

        let raw = self.algorithm.hull(points, tolerance)?;
        debug!(
            "hull of {} points: {} vertices, {} planes",
            points.len(),
            raw.vertices.len(),
            raw.planes.len()
        );

        let vertices: Vec<_> = raw
            .vertices
            .iter()
            .map(|v| utils::homogeneous(v, havok_scale))
            .collect();
        let normals: Vec<_> = raw
            .planes
            .iter()
            .map(|p| utils::plane_with_scaled_offset(p, havok_scale))
            .collect();

        Ok(ConvexHullResult {
            vertices: utils::sorted_unique(&vertices),
            normals: utils::sorted_unique(&normals),
            collision_radius: radius,
        })
    }
}
