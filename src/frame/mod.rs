//! Rigid transforms and the world frame of rigid bodies.

pub use self::transform::Transform;

mod transform;

use crate::error::SynthesisError;
use crate::math::{Quaternion, Real, UnitQuaternion, Vector4r, HAVOK_CONST};
use crate::scene::{self, BlockCaps, BlockType, Field, NodeKey, SceneGraph};

/// Computes the world frame of the rigid body `body`.
///
/// A `bhkRigidBodyT` starts from its own offset (translation scaled by
/// [`HAVOK_CONST`], rotation from its quaternion); a plain rigid body starts from the
/// identity. Every spatial ancestor then contributes its local transform, closest
/// first, as `accum = ancestor * accum`.
pub fn resolve_body_frame<S: SceneGraph + ?Sized>(
    scene: &S,
    body: NodeKey,
) -> Result<Transform, SynthesisError> {
    let kind = scene
        .block_type(body)
        .filter(|k| k.has(BlockCaps::RIGID_BODY))
        .ok_or_else(|| SynthesisError::topology("the block is not a rigid body"))?;

    let own = if kind == BlockType::BhkRigidBodyT {
        body_offset(scene, body)
    } else {
        Transform::identity()
    };

    Ok(scene::ancestors(scene, body)
        .filter(|n| scene.has_caps(*n, BlockCaps::SPATIAL))
        .fold(own, |accum, n| local_transform(scene, n) * accum))
}

/// The local transform of a spatial block, from its Translation, Rotation and Scale.
///
/// Missing fields fall back to the identity.
pub fn local_transform<S: SceneGraph + ?Sized>(scene: &S, node: NodeKey) -> Transform {
    Transform {
        translation: scene.get(node, Field::Translation).unwrap_or_default(),
        rotation: scene
            .get(node, Field::Rotation)
            .unwrap_or_else(na::Matrix3::identity),
        scale: scene.get::<Real>(node, Field::Scale).unwrap_or(1.0),
    }
}

fn body_offset<S: SceneGraph + ?Sized>(scene: &S, body: NodeKey) -> Transform {
    let translation = scene
        .get::<Vector4r>(body, Field::Translation)
        .unwrap_or_default()
        * HAVOK_CONST;
    let rotation = scene
        .get::<Quaternion<Real>>(body, Field::Rotation)
        .map(|q| UnitQuaternion::new_normalize(q).to_rotation_matrix().into_inner())
        .unwrap_or_else(na::Matrix3::identity);

    Transform {
        translation: translation.xyz(),
        rotation,
        scale: 1.0,
    }
}
