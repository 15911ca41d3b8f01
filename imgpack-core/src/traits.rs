//! Core traits for plane codecs.
//!
//! Every whole-plane pipeline (the LZW codec in `imgpack-lzw`, or an external
//! run-length + Huffman pipeline sharing the predictive filter) implements
//! [`PlaneCodec`].

use crate::plane::Plane;

/// A lossless codec for one image channel.
pub trait PlaneCodec {
    /// Compressed representation produced by [`encode`](Self::encode).
    type Encoded;

    /// Error type for both directions.
    type Error: std::error::Error;

    /// Compress a plane.
    fn encode(&self, plane: &Plane) -> Result<Self::Encoded, Self::Error>;

    /// Restore a plane compressed by [`encode`](Self::encode) with the same
    /// codec settings.
    fn decode(&self, encoded: &Self::Encoded) -> Result<Plane, Self::Error>;

    /// Encode then decode, returning whether the plane survived unchanged.
    fn verify(&self, plane: &Plane) -> Result<bool, Self::Error> {
        let encoded = self.encode(plane)?;
        Ok(self.decode(&encoded)? == *plane)
    }
}
