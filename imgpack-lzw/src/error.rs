//! LZW-specific error types.

use imgpack_core::CoreError;
use thiserror::Error;

/// Compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Symbol outside `0..=510`.
    #[error("Invalid symbol {symbol} at index {index}")]
    InvalidSymbol {
        /// Offending value.
        symbol: i32,
        /// Position in the flattened symbol stream.
        index: usize,
    },

    /// Code that cannot be resolved against the current dictionary.
    #[error("Corrupt stream: undecodable code {code} at position {position}")]
    CorruptStream {
        /// Offending code.
        code: u16,
        /// Index of the code within the code stream (header excluded).
        position: usize,
    },

    /// Decoded symbol count differs from the declared shape.
    #[error("Shape mismatch: header declares {expected} samples, stream decodes to {actual}")]
    ShapeMismatch {
        /// `height * width` from the header.
        expected: usize,
        /// Number of decoded symbols, counted up to the first overrun.
        actual: usize,
    },

    /// Segment size of zero.
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    /// Plane dimension that does not fit the 16-bit header.
    #[error("Plane dimensions {height}x{width} exceed the 65535 header limit")]
    DimensionTooLarge {
        /// Plane height.
        height: usize,
        /// Plane width.
        width: usize,
    },

    /// Stream shorter than the two-word shape header.
    #[error("Truncated header: need 2 words, found {found}")]
    TruncatedHeader {
        /// Number of words available.
        found: usize,
    },

    /// Byte stream with an odd length.
    #[error("Truncated stream: {bytes} bytes is not a whole number of 16-bit words")]
    TruncatedStream {
        /// Total byte length read.
        bytes: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;

impl From<CoreError> for LzwError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ShapeMismatch {
                expected, actual, ..
            } => Self::ShapeMismatch { expected, actual },
            CoreError::InvalidSymbol { value, index } => Self::InvalidSymbol {
                symbol: value,
                index,
            },
        }
    }
}
