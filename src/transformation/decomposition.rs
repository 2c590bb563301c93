use super::MeshBuffers;
use crate::error::SynthesisError;
use crate::math::{Point, Real, Triangle, Vector4r};
use crate::utils::{self, ccw_face_normal};
use parry3d::shape::Tetrahedron;
use parry3d::transformation::try_convex_hull;
use parry3d::transformation::vhacd::{VHACDParameters, VHACD};
use parry3d::transformation::voxelization::FillMode;
use serde::{Deserialize, Serialize};

/// How the voxelized interior of a mesh is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMethod {
    /// Fill everything reachable from the outside boundary.
    #[default]
    FloodFill,
    /// Only voxels touching the surface.
    Surface,
    /// Flood fill with cavity detection by ray casting.
    Raycast,
}

impl FillMethod {
    fn to_parry(self) -> FillMode {
        match self {
            FillMethod::FloodFill => FillMode::FloodFill {
                detect_cavities: false,
            },
            FillMethod::Surface => FillMode::SurfaceOnly,
            FillMethod::Raycast => FillMode::FloodFill {
                detect_cavities: true,
            },
        }
    }
}

/// Parameters of one convex decomposition.
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionParams {
    /// Upper bound on the number of hulls.
    pub max_convex_hulls: u32,
    /// Total voxel budget of the voxelization.
    pub resolution: u32,
    /// Accepted volume error between a part and its hull, in percent.
    pub minimum_volume_percent_error_allowed: f64,
    /// Upper bound on the vertex count of every hull.
    pub max_vertices_per_hull: u32,
    /// Interior detection.
    pub fill_method: FillMethod,
    /// The Havok material written on every generated shape.
    pub material_tag: u32,
    /// Whether the body is configured as static scenery instead of clutter.
    pub treat_as_static: bool,
    /// Collision radius of every generated hull.
    pub hull_radius: Real,
}

impl Default for DecompositionParams {
    fn default() -> Self {
        Self {
            max_convex_hulls: 16,
            resolution: 400_000,
            minimum_volume_percent_error_allowed: 0.01,
            max_vertices_per_hull: 16,
            fill_method: FillMethod::FloodFill,
            material_tag: 0,
            treat_as_static: false,
            hull_radius: 0.001,
        }
    }
}

/// One hull returned by a decomposition backend, in mesh units.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct RawHull {
    pub points: Vec<Point>,
    pub triangles: Vec<Triangle>,
}

/// An approximate convex decomposition algorithm.
pub trait ConvexDecomposition {
    /// Splits `mesh` into convex hulls.
    fn decompose(
        &self,
        mesh: &MeshBuffers,
        params: &DecompositionParams,
    ) -> Result<Vec<RawHull>, SynthesisError>;
}

impl<T: ConvexDecomposition + ?Sized> ConvexDecomposition for &T {
    fn decompose(
        &self,
        mesh: &MeshBuffers,
        params: &DecompositionParams,
    ) -> Result<Vec<RawHull>, SynthesisError> {
        (**self).decompose(mesh, params)
    }
}

/// V-HACD from `parry3d`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParryVhacd;

impl ParryVhacd {
    /// Converts the decomposition parameters to the parry ones.
    ///
    /// The voxel budget is spread evenly over the three axes.
    pub fn parameters(params: &DecompositionParams) -> VHACDParameters {
        let per_axis = (params.resolution as f64).cbrt().round().max(1.0) as u32;

        VHACDParameters {
            concavity: (params.minimum_volume_percent_error_allowed / 100.0) as Real,
            resolution: per_axis,
            fill_mode: params.fill_method.to_parry(),
            max_convex_hulls: params.max_convex_hulls.max(1),
            ..VHACDParameters::default()
        }
    }

    /// Keeps at most `max` points, picked by farthest-point sampling, and hulls them
    /// again.
    fn limit_vertices(hull: RawHull, max: usize) -> Result<RawHull, SynthesisError> {
        if hull.points.len() <= max {
            return Ok(hull);
        }
        if max < 4 {
            return Err(SynthesisError::LibraryFailure(format!(
                "a hull cannot have fewer than 4 vertices, {max} requested"
            )));
        }

        let sampled = farthest_point_sample(&hull.points, max);
        let (points, triangles) = try_convex_hull(&sampled)?;

        if triangles.is_empty() || points.len() > max {
            return Err(SynthesisError::LibraryFailure(format!(
                "cannot reduce a hull of {} vertices to {}",
                hull.points.len(),
                max
            )));
        }

        Ok(RawHull { points, triangles })
    }
}

impl ConvexDecomposition for ParryVhacd {
    fn decompose(
        &self,
        mesh: &MeshBuffers,
        params: &DecompositionParams,
    ) -> Result<Vec<RawHull>, SynthesisError> {
        mesh.check_indices()?;

        let vhacd = VHACD::decompose(
            &Self::parameters(params),
            &mesh.points,
            &mesh.triangles,
            true,
        );
        let hulls: Vec<_> = vhacd
            .compute_exact_convex_hulls(&mesh.points, &mesh.triangles)
            .into_iter()
            .filter(|(_, triangles)| !triangles.is_empty())
            .map(|(points, triangles)| RawHull { points, triangles })
            .collect();
        let split = hulls.len();
        let hulls = merge_down(hulls, params.max_convex_hulls.max(1) as usize)?;

        if hulls.len() < split {
            debug!("merged {} V-HACD parts into {} hulls", split, hulls.len());
        }

        let max_vertices = params.max_vertices_per_hull as usize;
        hulls
            .into_iter()
            .map(|hull| Self::limit_vertices(hull, max_vertices))
            .collect()
    }
}

impl RawHull {
    /// The convex hull of the points of both hulls.
    fn merged(&self, other: &RawHull) -> Result<RawHull, SynthesisError> {
        let points: Vec<Point> = self.points.iter().chain(&other.points).copied().collect();
        let (points, triangles) = try_convex_hull(&points)?;
        Ok(RawHull { points, triangles })
    }

    /// The volume enclosed by the triangles, assumed to form a closed convex surface.
    fn volume(&self) -> Real {
        let Some(apex) = self.points.first() else {
            return 0.0;
        };

        self.triangles
            .iter()
            .filter_map(|t| {
                let [a, b, c] = t.map(|i| self.points.get(i as usize));
                Some(Tetrahedron::new(*apex, *a?, *b?, *c?).signed_volume())
            })
            .sum::<Real>()
            .abs()
    }
}

/// Merges the pair of hulls whose common hull adds the least volume, until at most
/// `max` hulls remain.
///
/// `costs[i][j]` is the volume added by merging hulls `i` and `j`.
fn merge_down(mut hulls: Vec<RawHull>, max: usize) -> Result<Vec<RawHull>, SynthesisError> {
    if hulls.len() <= max {
        return Ok(hulls);
    }

    let mut volumes: Vec<Real> = hulls.iter().map(RawHull::volume).collect();
    let mut costs = vec![vec![Real::MAX; hulls.len()]; hulls.len()];

    for i in 1..hulls.len() {
        for j in 0..i {
            let cost = merge_cost(&hulls, &volumes, i, j)?;
            costs[i][j] = cost;
            costs[j][i] = cost;
        }
    }

    while hulls.len() > max {
        let Some((i, j)) = cheapest_pair(&costs) else {
            break;
        };

        // j < i, so swap-removing i leaves j in place.
        hulls[j] = hulls[i].merged(&hulls[j])?;
        volumes[j] = hulls[j].volume();
        let _ = hulls.swap_remove(i);
        let _ = volumes.swap_remove(i);
        let _ = costs.swap_remove(i);
        for row in costs.iter_mut() {
            let _ = row.swap_remove(i);
        }

        for k in (0..hulls.len()).filter(|k| *k != j) {
            let cost = merge_cost(&hulls, &volumes, j, k)?;
            costs[j][k] = cost;
            costs[k][j] = cost;
        }
    }

    Ok(hulls)
}

fn merge_cost(
    hulls: &[RawHull],
    volumes: &[Real],
    i: usize,
    j: usize,
) -> Result<Real, SynthesisError> {
    let merged = hulls[i].merged(&hulls[j])?;
    Ok((merged.volume() - volumes[i] - volumes[j]).abs())
}

/// The `(i, j)` with `j < i` of the smallest cost.
fn cheapest_pair(costs: &[Vec<Real>]) -> Option<(usize, usize)> {
    costs
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row[..i].iter().enumerate().map(move |(j, c)| (i, j, *c)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(i, j, _)| (i, j))
}

/// Greedy farthest-point subsampling, seeded with the first point.
fn farthest_point_sample(points: &[Point], count: usize) -> Vec<Point> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut picked = vec![*first];
    let mut dist: Vec<Real> = points
        .iter()
        .map(|p| na::distance_squared(p, first))
        .collect();

    while picked.len() < count {
        let Some((best, best_dist)) = dist
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            break;
        };

        if best_dist <= 0.0 {
            break;
        }

        let p = points[best];
        picked.push(p);

        for (d, q) in dist.iter_mut().zip(points) {
            *d = d.min(na::distance_squared(&p, q));
        }
    }

    picked
}

/// A hull of a decomposition, ready to be written as a `bhkConvexVerticesShape`.
#[derive(Clone, Debug, PartialEq)]
pub struct HullPiece {
    /// Vertices in Havok units, `w = 0`, in the order returned by the backend.
    pub vertices: Vec<Vector4r>,
    /// One normal per hull triangle, `w = 0`.
    pub normals: Vec<Vector4r>,
    /// The Havok material of the shape.
    pub material: u32,
}

/// The ordered hulls of one decomposition.
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ConvexHullSet {
    pub pieces: Vec<HullPiece>,
}

impl ConvexHullSet {
    /// Number of hulls.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the set holds no hull.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The vertex batches fed to a MOPP generator, in hull order.
    pub fn vertex_batches(&self) -> impl Iterator<Item = &[Vector4r]> {
        self.pieces.iter().map(|p| &p.vertices[..])
    }
}

/// Runs a decomposition backend and converts its hulls to Havok shapes.
#[derive(Clone, Debug, Default)]
pub struct ConvexDecomposer<D = ParryVhacd> {
    backend: D,
}

impl<D: ConvexDecomposition> ConvexDecomposer<D> {
    /// A decomposer using `backend`.
    pub fn new(backend: D) -> Self {
        Self { backend }
    }

    /// Decomposes `mesh` into hulls expressed in Havok units.
    ///
    /// The backend normals, if any, are discarded: each triangle gets the normal of
    /// its rescaled vertices.
    pub fn decompose(
        &self,
        mesh: &MeshBuffers,
        params: &DecompositionParams,
        havok_scale: Real,
    ) -> Result<ConvexHullSet, SynthesisError> {
        if mesh.is_empty() {
            return Err(SynthesisError::topology("no mesh data was found"));
        }
        mesh.check_indices()?;

        let hulls = self.backend.decompose(mesh, params)?;

        if hulls.is_empty() {
            return Err(SynthesisError::LibraryFailure(
                "convex decomposition produced no hull".to_string(),
            ));
        }

        let pieces = hulls
            .iter()
            .map(|hull| Self::piece(hull, params.material_tag, havok_scale))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "decomposed {} points into {} hulls",
            mesh.points.len(),
            pieces.len()
        );
        Ok(ConvexHullSet { pieces })
    }

    fn piece(hull: &RawHull, material: u32, havok_scale: Real) -> Result<HullPiece, SynthesisError> {
        let rescaled: Vec<Point> = hull
            .points
            .iter()
            .map(|p| Point::from(p.coords / havok_scale))
            .collect();
        let mut normals = Vec::with_capacity(hull.triangles.len());

        for t in &hull.triangles {
            let [a, b, c] = t.map(|i| rescaled.get(i as usize));
            let (Some(a), Some(b), Some(c)) = (a, b, c) else {
                return Err(SynthesisError::LibraryFailure(
                    "convex decomposition returned an out-of-range index".to_string(),
                ));
            };
            normals.push(ccw_face_normal([a, b, c]).push(0.0));
        }

        Ok(HullPiece {
            vertices: rescaled.iter().map(|p| utils::homogeneous(p, 1.0)).collect(),
            normals,
            material,
        })
    }
}
