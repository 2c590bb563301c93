/// Schema field identifiers understood by the synthesis operations.
///
/// Each variant maps to one named field of the NIF block schema. Using an enum instead
/// of raw strings keeps typos out of the read and write paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Field {
    // Scene nodes.
    Translation,
    Rotation,
    Scale,
    Children,
    CollisionObject,
    Data,
    // Geometry data.
    Vertices,
    Triangles,
    Points,
    StripsData,
    // Collision objects and bodies.
    Target,
    Body,
    Shape,
    Layer,
    MotionSystem,
    QualityType,
    SolverDeactivation,
    ProcessContactCallbackDelay,
    Constraints,
    // Shapes.
    Normals,
    Radius,
    Material,
    SubShapes,
    NumVertices,
    Unknown6Floats,
    UnknownFloats,
    UnknownFloats2,
    Triangle,
    Normal,
    BuildType,
    Origin,
    MoppData,
    // Constraints.
    Entities,
    PivotA,
    PivotB,
    AxleA,
    AxleB,
    Perp2AxleInA1,
    Perp2AxleInB1,
    Perp2AxleInA2,
    Perp2AxleInB2,
    PlaneA,
    PlaneB,
    TwistA,
    TwistB,
    Ragdoll,
    LimitedHinge,
    Hinge,
    StiffSpring,
    Length,
}

impl Field {
    /// The field's name in the NIF schema.
    pub fn label(self) -> &'static str {
        match self {
            Field::Translation => "Translation",
            Field::Rotation => "Rotation",
            Field::Scale => "Scale",
            Field::Children => "Children",
            Field::CollisionObject => "Collision Object",
            Field::Data => "Data",
            Field::Vertices => "Vertices",
            Field::Triangles => "Triangles",
            Field::Points => "Points",
            Field::StripsData => "Strips Data",
            Field::Target => "Target",
            Field::Body => "Body",
            Field::Shape => "Shape",
            Field::Layer => "Layer",
            Field::MotionSystem => "Motion System",
            Field::QualityType => "Quality Type",
            Field::SolverDeactivation => "Solver Deactivation",
            Field::ProcessContactCallbackDelay => "Process Contact Callback Delay",
            Field::Constraints => "Constraints",
            Field::Normals => "Normals",
            Field::Radius => "Radius",
            Field::Material => "Material",
            Field::SubShapes => "Sub Shapes",
            Field::NumVertices => "Num Vertices",
            Field::Unknown6Floats => "Unknown 6 Floats",
            Field::UnknownFloats => "Unknown Floats",
            Field::UnknownFloats2 => "Unknown Floats 2",
            Field::Triangle => "Triangle",
            Field::Normal => "Normal",
            Field::BuildType => "Build Type",
            Field::Origin => "Origin",
            Field::MoppData => "MOPP Data",
            Field::Entities => "Entities",
            Field::PivotA => "Pivot A",
            Field::PivotB => "Pivot B",
            Field::AxleA => "Axle A",
            Field::AxleB => "Axle B",
            Field::Perp2AxleInA1 => "Perp2 Axle In A1",
            Field::Perp2AxleInB1 => "Perp2 Axle In B1",
            Field::Perp2AxleInA2 => "Perp2 Axle In A2",
            Field::Perp2AxleInB2 => "Perp2 Axle In B2",
            Field::PlaneA => "Plane A",
            Field::PlaneB => "Plane B",
            Field::TwistA => "Twist A",
            Field::TwistB => "Twist B",
            Field::Ragdoll => "Ragdoll",
            Field::LimitedHinge => "Limited Hinge",
            Field::Hinge => "Hinge",
            Field::StiffSpring => "Stiff Spring",
            Field::Length => "Length",
        }
    }

    /// Whether a link stored in this field owns its target.
    ///
    /// Owning links define the parent of the target block; the others (`Target`,
    /// `Entities`) are back-references.
    pub fn is_owning_link(self) -> bool {
        matches!(
            self,
            Field::Children
                | Field::CollisionObject
                | Field::Data
                | Field::StripsData
                | Field::Body
                | Field::Shape
                | Field::SubShapes
                | Field::Constraints
        )
    }
}
