//! Error types for imgpack core operations.
//!
//! This module covers the failures that can happen before any entropy coding
//! takes place: building planes with an inconsistent shape and moving samples
//! in and out of the biased symbol domain.

use thiserror::Error;

/// The main error type for core plane operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sample count does not match the declared plane shape.
    #[error("Shape mismatch: {height}x{width} plane needs {expected} samples, got {actual}")]
    ShapeMismatch {
        /// Declared plane height.
        height: usize,
        /// Declared plane width.
        width: usize,
        /// Number of samples the shape requires.
        expected: usize,
        /// Number of samples actually supplied.
        actual: usize,
    },

    /// Residual or symbol outside the biased symbol domain.
    #[error("Invalid symbol {value} at index {index} (symbols must lie in 0..=510)")]
    InvalidSymbol {
        /// Offending value, before or after biasing.
        value: i32,
        /// Position in the flattened plane.
        index: usize,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(height: usize, width: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            height,
            width,
            expected: height.saturating_mul(width),
            actual,
        }
    }

    /// Create an invalid symbol error.
    pub fn invalid_symbol(value: i32, index: usize) -> Self {
        Self::InvalidSymbol { value, index }
    }
}
