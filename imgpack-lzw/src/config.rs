//! Codec configuration and protocol constants.

use crate::error::{LzwError, Result};
use imgpack_core::Direction;

/// Number of codes permanently bound to single symbols (`0..512`).
pub const SINGLETON_COUNT: u16 = 512;

/// Maximum number of live dictionary entries, singletons included.
///
/// Learned codes therefore run from 512 up to 65533.
pub const MAX_ENTRIES: usize = 65534;

/// Reserved code marking the end of a segment and a dictionary reset.
pub const RESET_CODE: u16 = u16::MAX;

/// Default number of symbols per segment.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// Codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Maximum number of symbols coded with one dictionary.
    pub chunk_size: usize,
    /// Predictive filter direction. Must match between encode and decode.
    pub direction: Direction,
}

impl LzwConfig {
    /// Row-wise prediction, 50000-symbol segments.
    pub const DEFAULT: Self = Self {
        chunk_size: DEFAULT_CHUNK_SIZE,
        direction: Direction::Horizontal,
    };

    /// Column-wise prediction, 50000-symbol segments.
    pub const VERTICAL: Self = Self {
        chunk_size: DEFAULT_CHUNK_SIZE,
        direction: Direction::Vertical,
    };

    /// Create a new configuration.
    pub fn new(chunk_size: usize, direction: Direction) -> Self {
        Self {
            chunk_size,
            direction,
        }
    }

    /// Set the segment size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the filter direction.
    pub fn with_direction(mut self, direction: impl Into<Direction>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(LzwError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
