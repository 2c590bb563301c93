use super::ConstraintReport;
use crate::constraint::{self, reframe, ConstraintFrameData, ConstraintSite};
use crate::error::SynthesisError;
use crate::math::{Real, Vector4r};
use crate::scene::{BlockType, Field, NodeKey, Record, SceneGraph};

fn data_record<'s, S: SceneGraph + ?Sized>(
    scene: &'s S,
    node: NodeKey,
    descriptor: Option<Field>,
) -> Option<&'s Record> {
    let record = scene.record(node)?;
    match descriptor {
        Some(field) => record.record(field),
        None => Some(record),
    }
}

fn data_record_mut<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: NodeKey,
    descriptor: Option<Field>,
) -> Option<&mut Record> {
    let record = scene.record_mut(node)?;
    match descriptor {
        Some(field) => record.record_mut(field),
        None => Some(record),
    }
}

fn frames<S: SceneGraph + ?Sized>(
    scene: &S,
    node: NodeKey,
) -> Result<constraint::BodyFrames, SynthesisError> {
    constraint::body_frames(scene, node).map_err(|err| {
        warn!("{:?}: {}", node, err);
        err
    })
}

/// Recomputes the B side of the pivot and axes of `node` from its A side, so the
/// joint stays in place when expressed in the frame of its second body.
pub fn transform_constraint<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: NodeKey,
) -> Result<ConstraintReport, SynthesisError> {
    let site = ConstraintSite::resolve(&*scene, node)?;
    let frames = frames(&*scene, node)?;

    let record = data_record(&*scene, node, site.descriptor)
        .ok_or_else(|| SynthesisError::topology("the constraint data is missing"))?;
    let data = reframe(
        site.kind,
        &ConstraintFrameData::read(site.kind, record),
        &frames.a,
        &frames.b,
    );

    if let Some(record) = data_record_mut(scene, node, site.descriptor) {
        data.write_b_side(site.kind, record);
    }

    debug!("re-expressed {:?} constraint {:?} in body B", site.kind, node);
    Ok(ConstraintReport {
        kind: site.kind,
        data,
    })
}

/// Recomputes and stores the length of the stiff spring constraint `node`.
///
/// The pivots are read from its `Stiff Spring` descriptor when present, from the
/// block itself otherwise.
pub fn calculate_spring_length<S: SceneGraph + ?Sized>(
    scene: &mut S,
    node: NodeKey,
) -> Result<Real, SynthesisError> {
    if scene.block_type(node) != Some(BlockType::BhkStiffSpringConstraint) {
        return Err(SynthesisError::topology("the block is not a stiff spring constraint"));
    }

    let frames = frames(&*scene, node)?;
    let descriptor = scene
        .record(node)
        .and_then(|r| r.record(Field::StiffSpring))
        .map(|_| Field::StiffSpring);

    let record = data_record(&*scene, node, descriptor)
        .ok_or_else(|| SynthesisError::topology("the constraint data is missing"))?;
    let pivot = |f: Field| record.get::<Vector4r>(f).unwrap_or_default();
    let length = constraint::spring_length(
        &frames.a,
        &frames.b,
        &pivot(Field::PivotA),
        &pivot(Field::PivotB),
    );

    if let Some(record) = data_record_mut(scene, node, descriptor) {
        record.set(Field::Length, length);
    }

    Ok(length)
}
