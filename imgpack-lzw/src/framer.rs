//! Segment framing and the shape header.
//!
//! The flattened symbol stream is cut into segments of at most
//! `chunk_size` symbols, each coded with its own dictionary. The plane shape
//! travels in front of the codes as two 16-bit words.

use crate::config::{DEFAULT_CHUNK_SIZE, RESET_CODE};
use crate::error::{LzwError, Result};
use imgpack_core::Shape;

/// Number of words in the shape header.
pub const HEADER_WORDS: usize = 2;

/// Splits symbol streams into bounded segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkFramer {
    chunk_size: usize,
}

impl ChunkFramer {
    /// Create a framer. `chunk_size` must be at least 1.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(LzwError::InvalidChunkSize(chunk_size));
        }
        Ok(Self { chunk_size })
    }

    /// Maximum symbols per segment.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Consecutive segments of `symbols`; the last one may be shorter.
    pub fn segments<'a>(&self, symbols: &'a [u16]) -> std::slice::Chunks<'a, u16> {
        symbols.chunks(self.chunk_size)
    }

    /// Number of segments (and reset codes) for `len` symbols.
    pub fn segment_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size)
    }
}

impl Default for ChunkFramer {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Encode a shape as the two-word `[height, width]` header.
pub fn encode_header(shape: Shape) -> Result<[u16; HEADER_WORDS]> {
    match (u16::try_from(shape.height), u16::try_from(shape.width)) {
        (Ok(height), Ok(width)) => Ok([height, width]),
        _ => Err(LzwError::DimensionTooLarge {
            height: shape.height,
            width: shape.width,
        }),
    }
}

/// Split a word stream into its shape header and the code stream.
pub fn decode_header(words: &[u16]) -> Result<(Shape, &[u16])> {
    match words {
        [height, width, codes @ ..] => Ok((
            Shape::new(usize::from(*height), usize::from(*width)),
            codes,
        )),
        _ => Err(LzwError::TruncatedHeader { found: words.len() }),
    }
}

/// Check that the decoded symbols fill `shape` exactly.
pub fn reassemble(shape: Shape, symbols: Vec<u16>) -> Result<Vec<u16>> {
    let expected = shape.len();
    if symbols.len() != expected {
        return Err(LzwError::ShapeMismatch {
            expected,
            actual: symbols.len(),
        });
    }
    Ok(symbols)
}

/// Code runs of a stream, one per segment, reset codes removed.
///
/// A stream ending in a reset code does not yield a trailing empty run.
pub fn split_segments(codes: &[u16]) -> impl Iterator<Item = &[u16]> {
    let body = codes.strip_suffix(&[RESET_CODE]).unwrap_or(codes);
    let empty = codes.is_empty();
    body.split(|&c| c == RESET_CODE).filter(move |_| !empty)
}

/// Number of reset codes in a code stream.
pub fn reset_count(codes: &[u16]) -> usize {
    codes.iter().filter(|&&c| c == RESET_CODE).count()
}
