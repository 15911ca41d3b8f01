//! # imgpack-lzw: Segmented LZW for image planes
//!
//! This crate losslessly compresses one 8-bit image channel by running a
//! predictive delta filter and then an adaptive-dictionary (LZW) coder over
//! bounded segments of the filtered samples.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Predictive filter**: row-wise or column-wise deltas, biased into a
//!   511-symbol alphabet
//! - **16-bit codes**: 512 singleton codes, learned codes up to 65533
//! - **Freeze policy**: a full dictionary stops learning instead of failing
//! - **Segments**: every `chunk_size` symbols start from a fresh dictionary
//! - **Parallel decode**: optional `parallel` feature (rayon)
//!
//! ## Stream Layout
//!
//! ```text
//! [height, width, codes of segment 1.., 65535, codes of segment 2.., 65535, ...]
//! ```
//!
//! Code 65535 ends a segment and resets the dictionary. The stream holds
//! exactly `ceil(height * width / chunk_size)` of them.
//!
//! ## Example
//!
//! ```rust
//! use imgpack_core::Plane;
//! use imgpack_lzw::{LzwConfig, compress, decompress};
//!
//! let plane = Plane::from_rows(&[[10u8, 10, 10, 10], [10, 10, 10, 10]]).unwrap();
//!
//! let words = compress(&plane, LzwConfig::DEFAULT).unwrap();
//! let restored = decompress(&words, LzwConfig::DEFAULT).unwrap();
//!
//! assert_eq!(restored, plane);
//! ```
//!
//! ## Segment-Level Coding
//!
//! ```rust
//! use imgpack_lzw::{LzwDecoder, LzwEncoder, RESET_CODE};
//!
//! let codes = LzwEncoder::new().encode(&[1; 8]).unwrap();
//! assert_eq!(codes, vec![1, 512, 513, 512, RESET_CODE]);
//!
//! let symbols = LzwDecoder::new().decode(&codes).unwrap();
//! assert_eq!(symbols, vec![1; 8]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codec;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
pub mod framer;
mod stream;

pub use codec::LzwCodec;
pub use config::{DEFAULT_CHUNK_SIZE, LzwConfig, MAX_ENTRIES, RESET_CODE, SINGLETON_COUNT};
pub use decoder::LzwDecoder;
pub use dictionary::{DecodeDictionary, DictionaryState, EncodeDictionary};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};
pub use framer::ChunkFramer;
pub use stream::CompressedStream;

use imgpack_core::Plane;

/// Compress a plane into the wire word array.
///
/// # Parameters
///
/// - `plane`: image channel to compress
/// - `config`: segment size and filter direction
///
/// # Returns
///
/// `[height, width, codes...]` with one reset code per segment.
///
/// # Example
///
/// ```rust
/// use imgpack_core::Plane;
/// use imgpack_lzw::{LzwConfig, RESET_CODE, compress};
///
/// let plane = Plane::filled(1, 1, 0);
/// let words = compress(&plane, LzwConfig::DEFAULT).unwrap();
/// assert_eq!(words, vec![1, 1, 255, RESET_CODE]);
/// ```
pub fn compress(plane: &Plane, config: LzwConfig) -> Result<Vec<u16>> {
    LzwCodec::new(config)?.compress(plane)
}

/// Restore a plane from the wire word array.
///
/// `config.direction` must match the direction used to compress; the segment
/// size is irrelevant for decoding.
///
/// # Example
///
/// ```rust
/// use imgpack_core::Plane;
/// use imgpack_lzw::{LzwConfig, compress, decompress};
///
/// let plane = Plane::from_rows(&[[1u8], [2], [3]]).unwrap();
/// let words = compress(&plane, LzwConfig::VERTICAL).unwrap();
/// assert_eq!(decompress(&words, LzwConfig::VERTICAL).unwrap(), plane);
/// ```
pub fn decompress(words: &[u16], config: LzwConfig) -> Result<Plane> {
    LzwCodec::new(config)?.decompress(words)
}
