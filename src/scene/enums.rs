use std::collections::HashMap;

/// Named enumeration options of the block schema, e.g. `hkMotionType`.
#[derive(Clone, Debug, Default)]
pub struct EnumTable {
    enums: HashMap<String, Vec<(String, u32)>>,
}

impl EnumTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rigid-body and MOPP enumerations written by the decomposition operations.
    ///
    /// Havok materials are game specific and must be registered by the host.
    pub fn havok_defaults() -> Self {
        let mut table = Self::new();
        table.register(
            "SkyrimLayer",
            &[
                ("SKYL_UNIDENTIFIED", 0),
                ("SKYL_STATIC", 1),
                ("SKYL_ANIMSTATIC", 2),
                ("SKYL_TRANSPARENT", 3),
                ("SKYL_CLUTTER", 4),
            ],
        );
        table.register(
            "hkMotionType",
            &[
                ("MO_SYS_INVALID", 0),
                ("MO_SYS_DYNAMIC", 1),
                ("MO_SYS_SPHERE_INERTIA", 2),
                ("MO_SYS_SPHERE_STABILIZED", 3),
                ("MO_SYS_BOX_INERTIA", 4),
                ("MO_SYS_BOX_STABILIZED", 5),
                ("MO_SYS_KEYFRAMED", 6),
                ("MO_SYS_FIXED", 7),
                ("MO_SYS_THIN_BOX", 8),
                ("MO_SYS_CHARACTER", 9),
            ],
        );
        table.register(
            "hkQualityType",
            &[
                ("MO_QUAL_INVALID", 0),
                ("MO_QUAL_FIXED", 1),
                ("MO_QUAL_KEYFRAMED", 2),
                ("MO_QUAL_DEBRIS", 3),
                ("MO_QUAL_MOVING", 4),
                ("MO_QUAL_CRITICAL", 5),
                ("MO_QUAL_BULLET", 6),
                ("MO_QUAL_USER", 7),
                ("MO_QUAL_CHARACTER", 8),
                ("MO_QUAL_KEYFRAMED_REPORT", 9),
            ],
        );
        table.register(
            "hkSolverDeactivation",
            &[
                ("SOLVER_DEACTIVATION_INVALID", 0),
                ("SOLVER_DEACTIVATION_OFF", 1),
                ("SOLVER_DEACTIVATION_LOW", 2),
                ("SOLVER_DEACTIVATION_MEDIUM", 3),
                ("SOLVER_DEACTIVATION_HIGH", 4),
                ("SOLVER_DEACTIVATION_MAX", 5),
            ],
        );
        table.register(
            "MoppDataBuildType",
            &[
                ("BUILT_WITH_CHUNK_SUBDIVISION", 0),
                ("BUILT_WITHOUT_CHUNK_SUBDIVISION", 1),
                ("BUILD_NOT_SET", 2),
            ],
        );
        table
    }

    /// Adds (or replaces) the options of `name`.
    pub fn register(&mut self, name: &str, options: &[(&str, u32)]) {
        let options = options
            .iter()
            .map(|(label, value)| (label.to_string(), *value))
            .collect();
        let _ = self.enums.insert(name.to_string(), options);
    }

    /// The value of option `label` of enumeration `name`.
    pub fn value(&self, name: &str, label: &str) -> Option<u32> {
        self.enums
            .get(name)?
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }
}
