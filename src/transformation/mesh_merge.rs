use crate::error::SynthesisError;
use crate::math::{Point, Triangle};

/// A triangle mesh as flat point and index buffers.
///
/// Several meshes can be appended one after another; the indices of each appended
/// mesh are rebased by the number of points already in the buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// The vertex positions.
    pub points: Vec<Point>,
    /// The triangles, indexing `points`.
    pub triangles: Vec<Triangle>,
}

impl MeshBuffers {
    /// An empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mesh, rebasing its triangle indices.
    ///
    /// Fails, leaving `self` unchanged, if a triangle indexes past the appended points.
    pub fn append<I>(&mut self, points: I, triangles: &[Triangle]) -> Result<(), SynthesisError>
    where
        I: IntoIterator<Item = Point>,
    {
        let base = self.points.len();
        self.points.extend(points);
        let count = self.points.len() - base;

        if let Some(t) = first_out_of_range(triangles, count) {
            self.points.truncate(base);
            return Err(out_of_range(t, count));
        }

        let base = base as u32;
        self.triangles
            .extend(triangles.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));
        Ok(())
    }

    /// Whether the mesh has no point or no triangle.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.triangles.is_empty()
    }

    /// Checks that every triangle index refers to a point of the mesh.
    pub fn check_indices(&self) -> Result<(), SynthesisError> {
        match first_out_of_range(&self.triangles, self.points.len()) {
            Some(t) => Err(out_of_range(t, self.points.len())),
            None => Ok(()),
        }
    }
}

fn first_out_of_range(triangles: &[Triangle], num_points: usize) -> Option<&Triangle> {
    triangles.iter().find(|t| t.iter().any(|i| *i as usize >= num_points))
}

fn out_of_range(t: &Triangle, num_points: usize) -> SynthesisError {
    warn!("triangle {:?} indexes past the {} mesh vertices", t, num_points);
    SynthesisError::topology(format!(
        "triangle {t:?} indexes past the {num_points} mesh vertices"
    ))
}
