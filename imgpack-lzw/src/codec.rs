//! Whole-plane codec: predictive filter, framing, and per-segment LZW.

use crate::config::LzwConfig;
use crate::decoder::LzwDecoder;
use crate::encoder::LzwEncoder;
use crate::error::{LzwError, Result};
use crate::framer::{self, ChunkFramer};
use crate::stream::CompressedStream;
use imgpack_core::{Plane, PlaneCodec, filter};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Predictive-delta + segmented LZW codec for one image channel.
#[derive(Debug, Clone, Copy)]
pub struct LzwCodec {
    config: LzwConfig,
    framer: ChunkFramer,
}

impl LzwCodec {
    /// Create a codec, validating the configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        let framer = ChunkFramer::new(config.chunk_size)?;
        Ok(Self { config, framer })
    }

    /// Codec configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Encode a flat symbol stream into reset-terminated segments.
    ///
    /// Every segment is coded with a fresh dictionary.
    pub fn encode_symbols(&self, symbols: &[u16]) -> Result<Vec<u16>> {
        let mut encoder = LzwEncoder::new();
        let mut codes = Vec::with_capacity(symbols.len() / 2 + 1);
        let mut offset = 0;

        for (index, segment) in self.framer.segments(symbols).enumerate() {
            let emitted = encoder
                .encode_into(segment, &mut codes)
                .map_err(|e| shift_symbol_index(e, offset))?;
            debug!(
                segment = index,
                symbols = segment.len(),
                codes = emitted,
                dictionary = encoder.dictionary_len(),
                "encoded segment"
            );
            offset += segment.len();
        }

        Ok(codes)
    }

    /// Decode a code stream produced by [`encode_symbols`](Self::encode_symbols).
    ///
    /// Decoding stops with [`LzwError::ShapeMismatch`] as soon as more than
    /// `limit` symbols would be produced.
    pub fn decode_symbols(&self, codes: &[u16], limit: usize) -> Result<Vec<u16>> {
        let mut decoder = LzwDecoder::new();
        let mut symbols = Vec::with_capacity(codes.len().saturating_mul(2).min(limit));
        let mut pos = 0;
        let mut index = 0;

        while pos < codes.len() {
            let before = symbols.len();
            let used = decoder.decode_segment_at(&codes[pos..], pos, limit, &mut symbols)?;
            debug!(
                segment = index,
                codes = used,
                symbols = symbols.len() - before,
                "decoded segment"
            );
            pos += used;
            index += 1;
        }

        Ok(symbols)
    }

    /// Decode the segments of a code stream concurrently.
    ///
    /// Output is identical to [`decode_symbols`](Self::decode_symbols). Each
    /// run is capped by the budget the finished runs have left, so memory
    /// stays bounded by `limit` per worker.
    #[cfg(feature = "parallel")]
    pub fn decode_symbols_parallel(&self, codes: &[u16], limit: usize) -> Result<Vec<u16>> {
        let mut runs = Vec::new();
        let mut pos = 0;
        for run in framer::split_segments(codes) {
            runs.push((pos, run));
            pos += run.len() + 1;
        }

        let produced = AtomicUsize::new(0);
        let decoded: Vec<Vec<u16>> = runs
            .par_iter()
            .map(|&(base, run)| {
                let budget = limit.saturating_sub(produced.load(Ordering::Relaxed));
                let mut out = Vec::with_capacity(run.len().saturating_mul(2).min(budget));
                LzwDecoder::new()
                    .decode_segment_at(run, base, budget, &mut out)
                    .map_err(|e| overall_mismatch(e, limit))?;

                let total = produced.fetch_add(out.len(), Ordering::Relaxed) + out.len();
                if total > limit {
                    return Err(LzwError::ShapeMismatch {
                        expected: limit,
                        actual: total,
                    });
                }
                Ok(out)
            })
            .collect::<Result<_>>()?;

        debug!(segments = decoded.len(), "decoded segments in parallel");
        Ok(decoded.concat())
    }

    /// Compress a plane.
    pub fn encode(&self, plane: &Plane) -> Result<CompressedStream> {
        let shape = plane.shape();
        framer::encode_header(shape)?;

        let residuals = filter::encode(plane, self.config.direction);
        let symbols = filter::to_symbols(&residuals)?;
        let codes = self.encode_symbols(&symbols)?;

        debug!(
            height = shape.height,
            width = shape.width,
            symbols = symbols.len(),
            codes = codes.len(),
            segments = self.framer.segment_count(symbols.len()),
            "encoded plane"
        );
        CompressedStream::new(shape, codes)
    }

    /// Restore a plane.
    pub fn decode(&self, stream: &CompressedStream) -> Result<Plane> {
        let shape = stream.shape();

        #[cfg(feature = "parallel")]
        let symbols = self.decode_symbols_parallel(stream.codes(), shape.len())?;
        #[cfg(not(feature = "parallel"))]
        let symbols = self.decode_symbols(stream.codes(), shape.len())?;

        let symbols = framer::reassemble(shape, symbols)?;
        let residuals = filter::from_symbols(shape.height, shape.width, &symbols)?;

        debug!(
            height = shape.height,
            width = shape.width,
            codes = stream.codes().len(),
            "decoded plane"
        );
        Ok(filter::decode(&residuals, self.config.direction))
    }

    /// Compress a plane into the wire word array.
    pub fn compress(&self, plane: &Plane) -> Result<Vec<u16>> {
        Ok(self.encode(plane)?.to_words())
    }

    /// Restore a plane from the wire word array.
    pub fn decompress(&self, words: &[u16]) -> Result<Plane> {
        self.decode(&CompressedStream::from_words(words)?)
    }
}

impl Default for LzwCodec {
    fn default() -> Self {
        Self {
            config: LzwConfig::DEFAULT,
            framer: ChunkFramer::default(),
        }
    }
}

impl PlaneCodec for LzwCodec {
    type Encoded = CompressedStream;
    type Error = LzwError;

    fn encode(&self, plane: &Plane) -> Result<CompressedStream> {
        LzwCodec::encode(self, plane)
    }

    fn decode(&self, encoded: &CompressedStream) -> Result<Plane> {
        LzwCodec::decode(self, encoded)
    }
}

fn shift_symbol_index(err: LzwError, offset: usize) -> LzwError {
    match err {
        LzwError::InvalidSymbol { symbol, index } => LzwError::InvalidSymbol {
            symbol,
            index: index + offset,
        },
        other => other,
    }
}

/// A run only sees part of the budget; report the mismatch against the
/// whole stream.
#[cfg(feature = "parallel")]
fn overall_mismatch(err: LzwError, limit: usize) -> LzwError {
    match err {
        LzwError::ShapeMismatch { actual, .. } => LzwError::ShapeMismatch {
            expected: limit,
            actual,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RESET_CODE;
    use imgpack_core::Direction;

    fn codec(chunk_size: usize, direction: Direction) -> LzwCodec {
        LzwCodec::new(LzwConfig::new(chunk_size, direction)).unwrap()
    }

    #[test]
    fn test_row_of_sevens() {
        let plane = Plane::from_rows(&[[7u8, 7, 7]]).unwrap();
        let stream = codec(50_000, Direction::Horizontal).encode(&plane).unwrap();
        // Symbols [262, 255, 255] -> codes [262, 255, 255].
        assert_eq!(stream.to_words(), vec![1, 3, 262, 255, 255, RESET_CODE]);
        assert_eq!(
            codec(50_000, Direction::Horizontal).decode(&stream).unwrap(),
            plane
        );
    }

    #[test]
    fn test_symbol_index_is_global() {
        let codec = codec(3, Direction::Horizontal);
        let err = codec.encode_symbols(&[1, 2, 3, 4, 600]).unwrap_err();
        assert!(matches!(
            err,
            LzwError::InvalidSymbol {
                symbol: 600,
                index: 4
            }
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            LzwCodec::new(LzwConfig::DEFAULT.with_chunk_size(0)),
            Err(LzwError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_default_codec() {
        let codec = LzwCodec::default();
        assert_eq!(*codec.config(), LzwConfig::DEFAULT);
        let plane = Plane::filled(3, 3, 128);
        assert!(codec.verify(&plane).unwrap());
    }

    #[test]
    fn test_shape_mismatch_detected() {
        let codec = codec(50_000, Direction::Horizontal);
        let mut words = codec.compress(&Plane::filled(2, 2, 9)).unwrap();
        words[1] = 3;
        assert!(matches!(
            codec.decompress(&words),
            Err(LzwError::ShapeMismatch {
                expected: 6,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_oversized_stream_stops_at_declared_shape() {
        // A 1x1 header followed by a chain of repair codes that would expand
        // to millions of symbols.
        let mut words = vec![1u16, 1, 0];
        words.extend(512..12_512);
        words.push(RESET_CODE);

        let codec = codec(50_000, Direction::Horizontal);
        assert!(matches!(
            codec.decompress(&words),
            Err(LzwError::ShapeMismatch {
                expected: 1,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_out_of_domain_singleton_in_stream() {
        let codec = codec(50_000, Direction::Horizontal);
        assert!(matches!(
            codec.decompress(&[1, 1, 511, RESET_CODE]),
            Err(LzwError::InvalidSymbol {
                symbol: 511,
                index: 0
            })
        ));
    }

    #[test]
    fn test_oversized_plane_rejected() {
        let codec = codec(50_000, Direction::Horizontal);
        let plane = Plane::filled(1, 70_000, 0);
        assert!(matches!(
            codec.encode(&plane),
            Err(LzwError::DimensionTooLarge { width: 70_000, .. })
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let codec = codec(37, Direction::Vertical);
        let symbols: Vec<u16> = (0..1000).map(|i| ((i * 7) % 23 + 240) as u16).collect();
        let codes = codec.encode_symbols(&symbols).unwrap();
        assert_eq!(
            codec.decode_symbols_parallel(&codes, 1000).unwrap(),
            codec.decode_symbols(&codes, 1000).unwrap()
        );
        assert!(matches!(
            codec.decode_symbols_parallel(&codes, 999),
            Err(LzwError::ShapeMismatch { expected: 999, .. })
        ));
    }
}
