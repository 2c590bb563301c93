use crate::error::SynthesisError;
use crate::math::{Point, Vector, HAVOK_CONST};
use crate::utils::ccw_face_normal;

/// Converts a triangle strip into a triangle list.
///
/// Every other triangle has its winding flipped so all faces keep the orientation of
/// the first one. Degenerate triangles, which strips use as stitches, are dropped.
pub fn triangulate_strip(strip: &[u16]) -> Vec<[u16; 3]> {
    strip
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let (a, b, c) = (w[0], w[1], w[2]);

            if a == b || b == c || c == a {
                None
            } else if i % 2 == 0 {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect()
}

/// The vertices and strips of one `NiTriStripsData`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripsData {
    /// Vertex positions, in scene units.
    pub vertices: Vec<Vector>,
    /// Index strips into `vertices`.
    pub strips: Vec<Vec<u16>>,
}

/// A triangle of a packed strips shape with its face normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PackedTriangle {
    /// Indices into [`PackedStrips::vertices`].
    pub triangle: [u16; 3],
    /// The face normal.
    pub normal: Vector,
}

/// The content of a `hkPackedNiTriStripsData`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedStrips {
    /// Every vertex of every source, in Havok units.
    pub vertices: Vec<Vector>,
    /// Every triangle of every source, indexing `vertices`.
    pub triangles: Vec<PackedTriangle>,
}

/// Merges strip data into one packed triangle list.
///
/// Normals are computed in scene units, before the vertices are divided by
/// [`HAVOK_CONST`]. Triangles referencing a vertex that does not exist get a zero
/// normal.
pub fn pack_strips(sources: &[StripsData]) -> Result<PackedStrips, SynthesisError> {
    let mut packed = PackedStrips::default();

    for data in sources {
        let base = packed.vertices.len();
        let vertex = |i: u16| Point::from(data.vertices.get(i as usize).copied().unwrap_or_default());

        for strip in &data.strips {
            for tri in triangulate_strip(strip) {
                let [a, b, c] = tri.map(vertex);
                let normal = ccw_face_normal([&a, &b, &c]);
                let triangle = rebase(tri, base)?;

                packed.triangles.push(PackedTriangle { triangle, normal });
            }
        }

        packed
            .vertices
            .extend(data.vertices.iter().map(|v| v / HAVOK_CONST));
    }

    if packed.vertices.is_empty() || packed.triangles.is_empty() {
        return Err(SynthesisError::topology("no mesh data was found"));
    }

    Ok(packed)
}

fn rebase(tri: [u16; 3], base: usize) -> Result<[u16; 3], SynthesisError> {
    let mut out = [0; 3];

    for (o, i) in out.iter_mut().zip(tri) {
        *o = u16::try_from(i as usize + base)
            .map_err(|_| SynthesisError::topology("too many vertices for a packed strips shape"))?;
    }

    Ok(out)
}
