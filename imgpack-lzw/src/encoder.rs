//! LZW encoder (compression).

use crate::config::RESET_CODE;
use crate::dictionary::{DictionaryState, EncodeDictionary};
use crate::error::{LzwError, Result};
use imgpack_core::MAX_SYMBOL;

/// LZW encoder for one segment at a time.
///
/// The dictionary is reset at the start of every [`encode`](Self::encode)
/// call, so no learned sequence survives a segment boundary.
#[derive(Debug, Default)]
pub struct LzwEncoder {
    /// Dictionary for sequence lookup.
    dict: EncodeDictionary,
}

impl LzwEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self {
            dict: EncodeDictionary::new(),
        }
    }

    /// Encode one segment, appending its codes and the reset code to `out`.
    ///
    /// # Algorithm
    ///
    /// 1. Extend the current match by the next symbol
    /// 2. If the extension is known, keep extending
    /// 3. Otherwise emit the match, learn the extension (unless frozen), and
    ///    restart from the symbol
    /// 4. Emit the final match, then the reset code
    ///
    /// Returns the number of codes appended, reset code included. On
    /// [`LzwError::InvalidSymbol`] the index is relative to `symbols` and
    /// `out` may hold a partial segment.
    pub fn encode_into(&mut self, symbols: &[u16], out: &mut Vec<u16>) -> Result<usize> {
        self.dict.reset();
        let start = out.len();

        // Code of the current match; a singleton's code is its symbol.
        let mut current: Option<u16> = None;

        for (index, &symbol) in symbols.iter().enumerate() {
            if symbol > MAX_SYMBOL {
                return Err(LzwError::InvalidSymbol {
                    symbol: i32::from(symbol),
                    index,
                });
            }

            current = Some(match current {
                None => symbol,
                Some(prefix) => match self.dict.find(prefix, symbol) {
                    Some(code) => code,
                    None => {
                        out.push(prefix);
                        let _ = self.dict.insert(prefix, symbol);
                        symbol
                    }
                },
            });
        }

        if let Some(code) = current {
            out.push(code);
        }
        out.push(RESET_CODE);

        Ok(out.len() - start)
    }

    /// Encode one segment into a fresh code vector (reset code included).
    pub fn encode(&mut self, symbols: &[u16]) -> Result<Vec<u16>> {
        let mut out = Vec::with_capacity(symbols.len() / 2 + 1);
        self.encode_into(symbols, &mut out)?;
        Ok(out)
    }

    /// Capacity state of the dictionary after the last segment.
    pub fn dictionary_state(&self) -> DictionaryState {
        self.dict.state()
    }

    /// Number of dictionary entries after the last segment.
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_ENTRIES;
    use crate::decoder::LzwDecoder;

    #[test]
    fn test_encode_literal_run() {
        let mut encoder = LzwEncoder::new();
        let codes = encoder.encode(&[1; 8]).unwrap();
        assert_eq!(codes, vec![1, 512, 513, 512, RESET_CODE]);

        let mut decoder = LzwDecoder::new();
        assert_eq!(decoder.decode(&codes).unwrap(), vec![1; 8]);
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::new();
        assert_eq!(encoder.encode(&[]).unwrap(), vec![RESET_CODE]);
    }

    #[test]
    fn test_encode_single_symbol_flushed() {
        let mut encoder = LzwEncoder::new();
        assert_eq!(encoder.encode(&[510]).unwrap(), vec![510, RESET_CODE]);
        assert_eq!(encoder.encode(&[0, 7]).unwrap(), vec![0, 7, RESET_CODE]);
    }

    #[test]
    fn test_encode_rejects_out_of_domain() {
        let mut encoder = LzwEncoder::new();
        let err = encoder.encode(&[4, 5, 511]).unwrap_err();
        assert!(matches!(
            err,
            LzwError::InvalidSymbol {
                symbol: 511,
                index: 2
            }
        ));
    }

    #[test]
    fn test_encode_resets_between_segments() {
        let mut encoder = LzwEncoder::new();
        let first = encoder.encode(&[9; 10]).unwrap();
        let second = encoder.encode(&[9; 10]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_alternating() {
        let mut encoder = LzwEncoder::new();
        let original: Vec<u16> = (0..18).map(|i| if i % 2 == 0 { 255 } else { 256 }).collect();
        let codes = encoder.encode(&original).unwrap();
        assert!(codes.len() < original.len());

        let mut decoder = LzwDecoder::new();
        assert_eq!(decoder.decode(&codes).unwrap(), original);
    }

    #[test]
    fn test_encode_freezes_and_keeps_going() {
        // Noise over the full alphabet learns a new entry at almost every step.
        let mut seed: u64 = 0x123456789ABCDEF0;
        let symbols: Vec<u16> = (0..200_000)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((seed >> 32) % 511) as u16
            })
            .collect();

        let mut encoder = LzwEncoder::new();
        let codes = encoder.encode(&symbols).unwrap();
        assert_eq!(encoder.dictionary_state(), DictionaryState::Frozen);
        assert_eq!(encoder.dictionary_len(), MAX_ENTRIES);
        assert!(codes[..codes.len() - 1].iter().all(|&c| (c as usize) < MAX_ENTRIES));

        let mut decoder = LzwDecoder::new();
        assert_eq!(decoder.decode(&codes).unwrap(), symbols);
    }
}
