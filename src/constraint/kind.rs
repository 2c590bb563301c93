use crate::error::SynthesisError;
use crate::scene::{BlockType, Field, NodeKey, SceneGraph};

/// The constraint families whose frames can be re-expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Pivot, plane and twist axes.
    Ragdoll,
    /// Pivot, axle and two perpendicular axes, with angular limits.
    LimitedHinge,
    /// Pivot, axle and two perpendicular axes.
    Hinge,
}

impl ConstraintKind {
    /// The wrappers are probed for these, in this order.
    const PROBE_ORDER: [ConstraintKind; 3] = [
        ConstraintKind::Ragdoll,
        ConstraintKind::LimitedHinge,
        ConstraintKind::Hinge,
    ];

    /// The field holding the inline descriptor of this kind inside a wrapper block.
    pub fn descriptor_field(self) -> Field {
        match self {
            ConstraintKind::Ragdoll => Field::Ragdoll,
            ConstraintKind::LimitedHinge => Field::LimitedHinge,
            ConstraintKind::Hinge => Field::Hinge,
        }
    }

    /// Whether this is one of the hinge constraints.
    pub fn is_hinge(self) -> bool {
        matches!(self, ConstraintKind::LimitedHinge | ConstraintKind::Hinge)
    }
}

/// Where the frame data of a constraint lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSite {
    /// The constraint block.
    pub node: NodeKey,
    /// The resolved constraint family.
    pub kind: ConstraintKind,
    /// The inline descriptor holding the pivots and axes, or `None` when they are
    /// stored on the block itself.
    pub descriptor: Option<Field>,
}

impl ConstraintSite {
    /// Resolves the family of `node` and the location of its frame data.
    ///
    /// Malleable and breakable wrappers resolve to the first of their ragdoll,
    /// limited hinge or hinge descriptors that is present.
    pub fn resolve<S: SceneGraph + ?Sized>(
        scene: &S,
        node: NodeKey,
    ) -> Result<Self, SynthesisError> {
        let record = scene
            .record(node)
            .ok_or_else(|| SynthesisError::topology("the constraint block does not exist"))?;
        let block = scene.block_type(node);

        let kind = match block {
            Some(BlockType::BhkRagdollConstraint) => Some(ConstraintKind::Ragdoll),
            Some(BlockType::BhkLimitedHingeConstraint) => Some(ConstraintKind::LimitedHinge),
            Some(BlockType::BhkHingeConstraint) => Some(ConstraintKind::Hinge),
            Some(BlockType::BhkMalleableConstraint | BlockType::BhkBreakableConstraint) => {
                ConstraintKind::PROBE_ORDER
                    .into_iter()
                    .find(|k| record.contains(k.descriptor_field()))
            }
            _ => None,
        };

        let kind = kind.ok_or_else(|| {
            SynthesisError::topology(format!(
                "unsupported constraint type: {}",
                block.map(BlockType::name).unwrap_or("<none>")
            ))
        })?;

        let descriptor = Some(kind.descriptor_field()).filter(|f| record.contains(*f));

        Ok(Self {
            node,
            kind,
            descriptor,
        })
    }
}
