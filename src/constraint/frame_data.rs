use super::ConstraintKind;
use crate::math::Vector4r;
use crate::scene::{Field, Record};

/// The field names of the A and B sides of each vector of a constraint family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisFields {
    /// The main axis: "Axle" for hinges, "Plane" for ragdolls.
    pub axle: (Field, Field),
    /// The first secondary axis: "Perp2 Axle In *1" for hinges, "Twist" for ragdolls.
    pub twist: (Field, Field),
    /// The second secondary axis, hinges only.
    pub twist2: Option<(Field, Field)>,
}

impl AxisFields {
    /// The axis fields used by `kind`.
    pub fn of(kind: ConstraintKind) -> Self {
        if kind.is_hinge() {
            AxisFields {
                axle: (Field::AxleA, Field::AxleB),
                twist: (Field::Perp2AxleInA1, Field::Perp2AxleInB1),
                twist2: Some((Field::Perp2AxleInA2, Field::Perp2AxleInB2)),
            }
        } else {
            AxisFields {
                axle: (Field::PlaneA, Field::PlaneB),
                twist: (Field::TwistA, Field::TwistB),
                twist2: None,
            }
        }
    }
}

/// Pivots and axes of a constraint, as stored in its record.
///
/// Missing vectors read as zero. Vectors the family does not use stay `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct ConstraintFrameData {
    pub pivot_a: Vector4r,
    pub pivot_b: Vector4r,
    pub axle_a: Option<Vector4r>,
    pub axle_b: Option<Vector4r>,
    pub twist_a: Option<Vector4r>,
    pub twist_b: Option<Vector4r>,
    pub twist_a2: Option<Vector4r>,
    pub twist_b2: Option<Vector4r>,
}

impl ConstraintFrameData {
    /// Reads the frame data of a `kind` constraint from `record`.
    pub fn read(kind: ConstraintKind, record: &Record) -> Self {
        let fields = AxisFields::of(kind);
        let vec = |f: Field| record.get::<Vector4r>(f).unwrap_or_default();

        ConstraintFrameData {
            pivot_a: vec(Field::PivotA),
            pivot_b: vec(Field::PivotB),
            axle_a: Some(vec(fields.axle.0)),
            axle_b: Some(vec(fields.axle.1)),
            twist_a: Some(vec(fields.twist.0)),
            twist_b: Some(vec(fields.twist.1)),
            twist_a2: fields.twist2.map(|f| vec(f.0)),
            twist_b2: fields.twist2.map(|f| vec(f.1)),
        }
    }

    /// Writes the B side into `record`. The A side is left untouched.
    pub fn write_b_side(&self, kind: ConstraintKind, record: &mut Record) {
        let fields = AxisFields::of(kind);

        record.set(Field::PivotB, self.pivot_b);

        let b_side = [
            (Some(fields.axle.1), self.axle_b),
            (Some(fields.twist.1), self.twist_b),
            (fields.twist2.map(|f| f.1), self.twist_b2),
        ];

        for (field, value) in b_side {
            if let (Some(field), Some(value)) = (field, value) {
                record.set(field, value);
            }
        }
    }
}
