use super::{MoppBlob, MoppError, MoppGenerator, MoppProvider};
use crate::math::Vector4r;

/// A MOPP generation session.
///
/// The underlying generator is closed when the encoder is dropped, whether or not
/// [`MoppEncoder::finish`] was reached.
pub struct MoppEncoder<'a> {
    generator: Box<dyn MoppGenerator + 'a>,
    hulls: usize,
}

impl<'a> MoppEncoder<'a> {
    /// Opens a session on `provider`.
    pub fn open(provider: &'a dyn MoppProvider) -> Result<Self, MoppError> {
        Ok(Self {
            generator: provider.open()?,
            hulls: 0,
        })
    }

    /// Feeds the vertices of the next hull.
    pub fn add_hull(&mut self, vertices: &[Vector4r]) -> Result<(), MoppError> {
        self.generator.add_vertices(vertices)?;
        self.hulls += 1;
        Ok(())
    }

    /// Builds the tree from every hull fed so far.
    pub fn finish(mut self) -> Result<MoppBlob, MoppError> {
        if self.hulls == 0 {
            return Err(MoppError::NoInput);
        }

        let blob = self.generator.compute()?;

        if blob.code.is_empty() {
            return Err(MoppError::EmptyCode);
        }

        debug!(
            "MOPP tree over {} hulls: {} bytes, scale {}",
            self.hulls,
            blob.code.len(),
            blob.scale
        );
        Ok(blob)
    }

    /// Opens a session, feeds every batch in order and builds the tree.
    pub fn encode<'b, I>(provider: &'a dyn MoppProvider, batches: I) -> Result<MoppBlob, MoppError>
    where
        I: IntoIterator<Item = &'b [Vector4r]>,
    {
        let mut encoder = Self::open(provider)?;

        for batch in batches {
            encoder.add_hull(batch)?;
        }

        encoder.finish()
    }
}

impl Drop for MoppEncoder<'_> {
    fn drop(&mut self) {
        self.generator.close();
    }
}
