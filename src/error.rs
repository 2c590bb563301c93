//! Errors reported by the synthesis operations.

use crate::config::ConfigError;
use crate::mopp::MoppError;
use parry3d::transformation::ConvexHullError;

/// Errors that abort a single synthesis operation.
///
/// None of these are fatal to the host: the operation that produced the error has
/// left the scene graph in its prior valid state, except for the documented case where
/// a list shape is written before the optional MOPP wrapper fails (see
/// [`crate::actions::MoppStatus`]).
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SynthesisError {
    /// The parameter source was abandoned before the computation started.
    #[error("operation cancelled by the user")]
    UserCancelled,

    /// The parameter source answered with settings outside their accepted range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Required linked data is missing: mesh data, the bodies of a constraint, or a
    /// recognized constraint sub-kind.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A wrapped hull, decomposition or MOPP call failed or returned an empty result.
    #[error("library failure: {0}")]
    LibraryFailure(String),

    /// The native MOPP generator is not available on this platform.
    #[error("feature unavailable: {0}")]
    FeatureUnavailable(String),
}

impl SynthesisError {
    /// Shorthand for [`SynthesisError::InvalidTopology`].
    pub fn topology(msg: impl Into<String>) -> Self {
        SynthesisError::InvalidTopology(msg.into())
    }
}

impl From<ConvexHullError> for SynthesisError {
    fn from(err: ConvexHullError) -> Self {
        SynthesisError::LibraryFailure(format!("convex hull: {err}"))
    }
}

impl From<ConfigError> for SynthesisError {
    fn from(err: ConfigError) -> Self {
        SynthesisError::InvalidParameters(err.to_string())
    }
}

impl From<MoppError> for SynthesisError {
    fn from(err: MoppError) -> Self {
        match err {
            MoppError::Unavailable(msg) => SynthesisError::FeatureUnavailable(msg),
            other => SynthesisError::LibraryFailure(other.to_string()),
        }
    }
}
