use super::{ConstraintFrameData, ConstraintKind};
use crate::frame::Transform;
use crate::math::{Point, Real, Vector, Vector4r, HAVOK_CONST};

/// Recomputes the B side of `data` so the constraint keeps its world placement when
/// expressed in the frame of body B.
///
/// The A side is authoritative and copied unchanged. Pivots go through both full
/// transforms in scene units; axes only through the rotations.
pub fn reframe(
    kind: ConstraintKind,
    data: &ConstraintFrameData,
    frame_a: &Transform,
    frame_b: &Transform,
) -> ConstraintFrameData {
    let inv_rot_b = frame_b.inverse_rotation();
    let dir = |v: Vector4r| {
        let d = inv_rot_b * (frame_a.rotation * v.xyz());
        d.push(0.0)
    };

    let world = frame_a.apply(&Point::from(data.pivot_a.xyz() * HAVOK_CONST));
    let pivot_b =
        inv_rot_b * (world.coords - frame_b.translation) / frame_b.scale / HAVOK_CONST;

    let mut out = *data;
    out.pivot_b = pivot_b.push(0.0);
    out.axle_b = data.axle_a.map(dir);
    out.twist_b = data.twist_a.map(dir);
    out.twist_b2 = if kind.is_hinge() {
        data.twist_a2.map(dir)
    } else {
        None
    };
    out
}

/// The rest length of a spring joining `pivot_a` on body A to `pivot_b` on body B.
pub fn spring_length(
    frame_a: &Transform,
    frame_b: &Transform,
    pivot_a: &Vector4r,
    pivot_b: &Vector4r,
) -> Real {
    let world = |frame: &Transform, pivot: &Vector4r| -> Vector {
        frame
            .apply(&Point::from(pivot.xyz() * HAVOK_CONST))
            .coords
    };

    (world(frame_a, pivot_a) - world(frame_b, pivot_b)).norm() / HAVOK_CONST
}
