use crate::error::SynthesisError;
use crate::math::Vector;
use crate::scene::{BlockType, Field, NodeKey, SceneGraph};
use crate::transformation::{self, StripsData};
use crate::writer::ShapeGraphWriter;

/// Replaces the `bhkNiTriStripsShape` `shape` by an equivalent
/// `bhkPackedNiTriStripsShape`.
///
/// Every link to `shape` is redirected to the packed shape, then `shape` and its
/// strips data are removed. Strips data still used by visual geometry is kept.
/// Returns the packed shape.
pub fn pack_strips<S: SceneGraph + ?Sized>(
    scene: &mut S,
    shape: NodeKey,
) -> Result<NodeKey, SynthesisError> {
    if scene.block_type(shape) != Some(BlockType::BhkNiTriStripsShape) {
        return Err(SynthesisError::topology("the block is not a bhkNiTriStripsShape"));
    }

    let sources: Vec<_> = scene
        .resolve_links(shape, Field::StripsData)
        .into_iter()
        .filter(|d| scene.block_type(*d) == Some(BlockType::NiTriStripsData))
        .map(|d| StripsData {
            vertices: scene.get_array::<Vector>(d, Field::Vertices),
            strips: scene.get_array::<Vec<u16>>(d, Field::Points),
        })
        .collect();

    let packed = transformation::pack_strips(&sources).map_err(|err| {
        warn!("{:?}: {}", shape, err);
        err
    })?;
    let (num_vertices, num_triangles) = (packed.vertices.len(), packed.triangles.len());

    let packed_shape = ShapeGraphWriter::new(&mut *scene).packed_strips_shape(shape, packed);
    scene.redirect_links(shape, packed_shape);
    scene.remove_subtree(shape);

    info!(
        "packed {} triangles over {} vertices",
        num_triangles, num_vertices
    );
    Ok(packed_shape)
}
