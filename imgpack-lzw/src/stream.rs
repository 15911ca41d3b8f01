//! Compressed stream container and its byte persistence.
//!
//! Wire layout, as 16-bit words:
//!
//! ```text
//! [height, width, codes of segment 1.., 65535, codes of segment 2.., 65535, ...]
//! ```
//!
//! On disk every word is stored little-endian.

use crate::error::{LzwError, Result};
use crate::framer::{self, HEADER_WORDS};
use imgpack_core::Shape;
use std::io::{Read, Write};

/// A shape header plus the reset-terminated code segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedStream {
    shape: Shape,
    codes: Vec<u16>,
}

impl CompressedStream {
    /// Wrap a code stream. Fails if `shape` does not fit the header.
    pub fn new(shape: Shape, codes: Vec<u16>) -> Result<Self> {
        framer::encode_header(shape)?;
        Ok(Self { shape, codes })
    }

    /// Declared plane shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Codes after the header, reset codes included.
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Number of segments, counted by reset codes.
    pub fn segment_count(&self) -> usize {
        framer::reset_count(&self.codes)
    }

    /// Code runs of each segment.
    pub fn segments(&self) -> impl Iterator<Item = &[u16]> {
        framer::split_segments(&self.codes)
    }

    /// Total length in words, header included.
    pub fn len_words(&self) -> usize {
        HEADER_WORDS + self.codes.len()
    }

    /// Flatten into the wire word array.
    pub fn to_words(&self) -> Vec<u16> {
        let mut words = Vec::with_capacity(self.len_words());
        words.push(self.shape.height as u16);
        words.push(self.shape.width as u16);
        words.extend_from_slice(&self.codes);
        words
    }

    /// Parse the wire word array.
    pub fn from_words(words: &[u16]) -> Result<Self> {
        let (shape, codes) = framer::decode_header(words)?;
        Ok(Self {
            shape,
            codes: codes.to_vec(),
        })
    }

    /// Serialize to little-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len_words() * 2);
        for word in self.to_words() {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Parse little-endian bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(LzwError::TruncatedStream { bytes: bytes.len() });
        }
        let words: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::from_words(&words)
    }

    /// Write the stream to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read a whole stream from `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RESET_CODE;
    use std::io::Cursor;

    fn sample() -> CompressedStream {
        CompressedStream::new(Shape::new(2, 4), vec![1, 512, RESET_CODE, 300, RESET_CODE]).unwrap()
    }

    #[test]
    fn test_words_layout() {
        let stream = sample();
        assert_eq!(
            stream.to_words(),
            vec![2, 4, 1, 512, RESET_CODE, 300, RESET_CODE]
        );
        assert_eq!(stream.len_words(), 7);
        assert_eq!(stream.segment_count(), 2);
        let runs: Vec<&[u16]> = stream.segments().collect();
        assert_eq!(runs, vec![&[1u16, 512][..], &[300][..]]);
        assert_eq!(CompressedStream::from_words(&stream.to_words()).unwrap(), stream);
    }

    #[test]
    fn test_bytes_little_endian() {
        let stream = CompressedStream::new(Shape::new(1, 258), vec![RESET_CODE]).unwrap();
        assert_eq!(stream.to_bytes(), vec![1, 0, 2, 1, 0xFF, 0xFF]);
    }

    #[test]
    fn test_io_roundtrip() {
        let stream = sample();
        let mut buf = Vec::new();
        stream.write_to(&mut buf).unwrap();

        let read = CompressedStream::read_from(&mut Cursor::new(buf)).unwrap();
        assert_eq!(read, stream);
    }

    #[test]
    fn test_odd_byte_count_rejected() {
        assert!(matches!(
            CompressedStream::from_bytes(&[2, 0, 4]),
            Err(LzwError::TruncatedStream { bytes: 3 })
        ));
        assert!(matches!(
            CompressedStream::from_bytes(&[2, 0]),
            Err(LzwError::TruncatedHeader { found: 1 })
        ));
    }

    #[test]
    fn test_oversized_shape_rejected() {
        assert!(CompressedStream::new(Shape::new(70_000, 1), Vec::new()).is_err());
    }
}
