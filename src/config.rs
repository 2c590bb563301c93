//! Synthesis settings.
//!
//! Settings are layered with the following priority (lowest to highest):
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. environment variables (`HAVOKGEN_SECTION__KEY`).

use crate::math::Real;
use crate::transformation::{DecompositionParams, FillMethod};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of every synthesis operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Single convex hull settings.
    #[serde(default)]
    pub hull: HullSettings,
    /// Convex decomposition settings.
    #[serde(default)]
    pub decomposition: DecompositionSettings,
}

impl SynthesisConfig {
    /// Loads the defaults, overridden by `path` if it exists, then by the
    /// `HAVOKGEN_` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        // HAVOKGEN_HULL__TOLERANCE=0.5 -> hull.tolerance = 0.5
        Self::from_figment(figment.merge(Env::prefixed("HAVOKGEN_").split("__")))
    }

    /// Extracts and validates the settings of `figment`.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every setting against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hull.validate()?;
        self.decomposition.validate()
    }
}

/// Settings of the single convex hull operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullSettings {
    /// Hull vertices closer than this are merged, in scene units.
    pub tolerance: Real,
    /// Collision radius of the shape.
    pub radius: Real,
}

impl Default for HullSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.25,
            radius: 0.05,
        }
    }
}

impl HullSettings {
    /// Checks every setting against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("hull.tolerance", self.tolerance as f64, 0.0, 5.0)?;
        check("hull.radius", self.radius as f64, 0.0, 0.5)
    }
}

/// Settings of the convex decomposition operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionSettings {
    /// Total voxel budget.
    pub resolution: u32,
    /// Upper bound on the number of hulls.
    pub max_convex_hulls: u32,
    /// Accepted volume error, in percent.
    pub volume_error_percent: f64,
    /// Upper bound on the vertex count of each hull.
    pub max_vertices_per_hull: u32,
    /// How the voxelized mesh interior is classified.
    pub fill_method: FillMethod,
    /// Label of the Havok material. Empty or unknown labels resolve to material 0.
    pub material: String,
    /// Configure the body as static scenery rather than clutter.
    pub treat_as_static: bool,
    /// Collision radius of every hull.
    pub hull_radius: Real,
}

impl Default for DecompositionSettings {
    fn default() -> Self {
        Self {
            resolution: 400_000,
            max_convex_hulls: 16,
            volume_error_percent: 0.01,
            max_vertices_per_hull: 16,
            fill_method: FillMethod::FloodFill,
            material: String::new(),
            treat_as_static: false,
            hull_radius: 0.001,
        }
    }
}

impl DecompositionSettings {
    /// Checks every setting against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            "decomposition.resolution",
            self.resolution as f64,
            10_000.0,
            64_000_000.0,
        )?;
        check(
            "decomposition.max_convex_hulls",
            self.max_convex_hulls as f64,
            1.0,
            100_000.0,
        )?;
        check(
            "decomposition.volume_error_percent",
            self.volume_error_percent,
            0.001,
            10.0,
        )?;
        check(
            "decomposition.max_vertices_per_hull",
            self.max_vertices_per_hull as f64,
            8.0,
            2048.0,
        )?;
        check("decomposition.hull_radius", self.hull_radius as f64, 0.0, 0.5)
    }

    /// The decomposition parameters, with the material already resolved to its tag.
    pub fn to_params(&self, material_tag: u32) -> DecompositionParams {
        DecompositionParams {
            max_convex_hulls: self.max_convex_hulls,
            resolution: self.resolution,
            minimum_volume_percent_error_allowed: self.volume_error_percent,
            max_vertices_per_hull: self.max_vertices_per_hull,
            fill_method: self.fill_method,
            material_tag,
            treat_as_static: self.treat_as_static,
            hull_radius: self.hull_radius,
        }
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A provider failed or a value has the wrong type.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
    /// A value lies outside its accepted range.
    #[error("configuration error: {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// The dotted path of the setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
    },
}

/// Supplies the settings of each operation, typically by asking the user.
///
/// Returning `None` cancels the operation before anything is computed. Answers are
/// range-checked before use.
pub trait ParameterSource {
    /// Settings for a single convex hull.
    fn hull_settings(&mut self) -> Option<HullSettings>;

    /// Settings for a convex decomposition.
    fn decomposition_settings(&mut self) -> Option<DecompositionSettings>;
}

/// A parameter source always answering with the same configuration.
#[derive(Debug, Clone, Default)]
pub struct FixedParameters(pub SynthesisConfig);

impl ParameterSource for FixedParameters {
    fn hull_settings(&mut self) -> Option<HullSettings> {
        Some(self.0.hull.clone())
    }

    fn decomposition_settings(&mut self) -> Option<DecompositionSettings> {
        Some(self.0.decomposition.clone())
    }
}
