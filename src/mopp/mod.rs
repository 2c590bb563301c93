//! MOPP acceleration trees for lists of convex shapes.
//!
//! The tree itself is produced by a native generator this crate does not ship. It is
//! reached through [`MoppProvider`], which the host injects into every decomposition.
//! Without one, [`UnavailableMopp`] reports [`MoppError::Unavailable`] and the
//! decomposition falls back to a bare list shape.

pub use self::encoder::MoppEncoder;

mod encoder;

use crate::math::{Real, Vector, Vector4r};

/// Lists of more than this many hulls get wrapped into a MOPP tree.
pub const MOPP_HULL_THRESHOLD: usize = 4;

/// Whether a decomposition with `hull_count` hulls needs a MOPP tree.
#[inline]
pub fn needs_mopp(hull_count: usize) -> bool {
    hull_count > MOPP_HULL_THRESHOLD
}

/// The result of a MOPP generation: quantization frame and opaque byte code.
#[derive(Clone, Debug, PartialEq)]
pub struct MoppBlob {
    /// Origin of the quantization grid.
    pub origin: Vector,
    /// Scale of the quantization grid.
    pub scale: Real,
    /// The opaque tree code.
    pub code: Vec<u8>,
}

/// Errors of a MOPP generation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MoppError {
    /// The native generator could not be opened.
    #[error("{0}")]
    Unavailable(String),
    /// The generator ran but produced no code.
    #[error("MOPP generator returned an empty code")]
    EmptyCode,
    /// The session was finished before any hull was added.
    #[error("no hull was added to the MOPP session")]
    NoInput,
    /// The generator reported a failure.
    #[error("MOPP generator failed: {0}")]
    Generator(String),
}

/// One open session of a native MOPP generator.
///
/// Hulls are accumulated with [`MoppGenerator::add_vertices`], then a single
/// [`MoppGenerator::compute`] call produces the tree.
pub trait MoppGenerator {
    /// Adds the vertices of one hull.
    fn add_vertices(&mut self, vertices: &[Vector4r]) -> Result<(), MoppError>;

    /// Builds the tree from every hull added so far.
    fn compute(&mut self) -> Result<MoppBlob, MoppError>;

    /// Releases the native resources of the session. Called once, on drop of the
    /// owning [`MoppEncoder`].
    fn close(&mut self) {}
}

/// Opens MOPP generator sessions.
pub trait MoppProvider {
    /// Opens a new session, or fails with [`MoppError::Unavailable`].
    fn open(&self) -> Result<Box<dyn MoppGenerator + '_>, MoppError>;
}

/// The provider used when no native generator is installed.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnavailableMopp;

impl MoppProvider for UnavailableMopp {
    fn open(&self) -> Result<Box<dyn MoppGenerator + '_>, MoppError> {
        Err(MoppError::Unavailable(
            "no MOPP generator is available on this platform".to_string(),
        ))
    }
}
