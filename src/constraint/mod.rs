//! Constraint frames: re-expressing pivots and axes from body A into body B.

pub use self::frame_data::{AxisFields, ConstraintFrameData};
pub use self::kind::{ConstraintKind, ConstraintSite};
pub use self::reframe::{reframe, spring_length};

mod frame_data;
mod kind;
mod reframe;

use crate::error::SynthesisError;
use crate::frame::{self, Transform};
use crate::scene::{BlockCaps, Field, NodeKey, SceneGraph};

/// The world frames of the two bodies a constraint connects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyFrames {
    /// Body A, the side whose constraint data is authoritative.
    pub a: Transform,
    /// Body B, the side that gets recomputed.
    pub b: Transform,
}

/// Resolves the frames of the two rigid bodies listed in the `Entities` of
/// `constraint`.
pub fn body_frames<S: SceneGraph + ?Sized>(
    scene: &S,
    constraint: NodeKey,
) -> Result<BodyFrames, SynthesisError> {
    let entities = scene.resolve_links(constraint, Field::Entities);
    let body = |i: usize| {
        entities
            .get(i)
            .copied()
            .filter(|e| scene.has_caps(*e, BlockCaps::RIGID_BODY))
    };

    match (body(0), body(1)) {
        (Some(a), Some(b)) => Ok(BodyFrames {
            a: frame::resolve_body_frame(scene, a)?,
            b: frame::resolve_body_frame(scene, b)?,
        }),
        _ => Err(SynthesisError::topology(
            "couldn't find the bodies for this constraint",
        )),
    }
}
