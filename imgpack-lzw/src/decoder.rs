//! LZW decoder (decompression).
//!
//! The decoder mirrors the encoder's dictionary growth one code behind. The
//! only code it may see before defining it is the one the encoder assigned
//! while emitting the previous code; that entry is rebuilt as
//! `previous + previous[0]`. Any other unknown code means the stream is
//! corrupt.

use crate::config::RESET_CODE;
use crate::dictionary::{DecodeDictionary, DictionaryState};
use crate::error::{LzwError, Result};

/// LZW decoder for segmented code streams.
#[derive(Debug, Default)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: DecodeDictionary,
}

impl LzwDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self {
            dict: DecodeDictionary::new(),
        }
    }

    /// Decode one segment from the front of `codes`, appending its symbols
    /// to `out`.
    ///
    /// Decoding stops after the first reset code, or at the end of `codes`
    /// when the trailing reset code is missing. Returns the number of codes
    /// consumed, reset code included.
    pub fn decode_segment(&mut self, codes: &[u16], out: &mut Vec<u16>) -> Result<usize> {
        self.decode_segment_at(codes, 0, usize::MAX, out)
    }

    /// Same as [`decode_segment`](Self::decode_segment), reporting error
    /// positions relative to `base`.
    ///
    /// `out` is never grown past `limit` symbols; a code that would do so
    /// fails with [`LzwError::ShapeMismatch`] before its sequence is written.
    pub(crate) fn decode_segment_at(
        &mut self,
        codes: &[u16],
        base: usize,
        limit: usize,
        out: &mut Vec<u16>,
    ) -> Result<usize> {
        self.dict.reset();
        let mut previous: Option<u16> = None;

        for (offset, &code) in codes.iter().enumerate() {
            if code == RESET_CODE {
                return Ok(offset + 1);
            }

            let corrupt = || LzwError::CorruptStream {
                code,
                position: base + offset,
            };

            // Learn previous + first(code) before emitting. When `code` is the
            // entry not yet materialized, its first symbol is previous[0],
            // and this push is what defines it.
            let first = if self.dict.contains(code) {
                self.dict.first_symbol(code)
            } else {
                match previous {
                    Some(prev)
                        if code == self.dict.next_code()
                            && self.dict.state() == DictionaryState::Growing =>
                    {
                        self.dict.first_symbol(prev)
                    }
                    _ => None,
                }
            }
            .ok_or_else(corrupt)?;

            if let Some(prev) = previous {
                let _ = self.dict.push(prev, first);
            }

            let len = self.dict.sequence_len(code).ok_or_else(corrupt)?;
            if out.len() + len > limit {
                return Err(LzwError::ShapeMismatch {
                    expected: limit,
                    actual: out.len() + len,
                });
            }

            if !self.dict.write_sequence(code, out) {
                return Err(corrupt());
            }
            previous = Some(code);
        }

        Ok(codes.len())
    }

    /// Decode a whole code stream of reset-terminated segments.
    ///
    /// Each reset code discards the dictionary before the next code is
    /// interpreted.
    pub fn decode(&mut self, codes: &[u16]) -> Result<Vec<u16>> {
        self.decode_bounded(codes, usize::MAX)
    }

    /// Decode a whole code stream expected to hold at most `limit` symbols.
    ///
    /// Fails with [`LzwError::ShapeMismatch`] as soon as the output would
    /// exceed `limit`, so a stream lying about its size cannot expand
    /// further.
    pub fn decode_bounded(&mut self, codes: &[u16], limit: usize) -> Result<Vec<u16>> {
        let mut output = Vec::with_capacity(codes.len().saturating_mul(2).min(limit));
        let mut pos = 0;
        while pos < codes.len() {
            pos += self.decode_segment_at(&codes[pos..], pos, limit, &mut output)?;
        }
        Ok(output)
    }

    /// Capacity state of the dictionary after the last segment.
    pub fn dictionary_state(&self) -> DictionaryState {
        self.dict.state()
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
