//! Predictive delta filter.
//!
//! Each sample is replaced by its difference from the previous sample along
//! one axis, which turns smooth image regions into runs of near-zero
//! residuals. The first column (horizontal) or first row (vertical) is kept
//! as-is.
//!
//! Residuals lie in `-255..=255`. Entropy coders work on the biased symbol
//! domain `0..=510`, see [`to_symbol`] and [`from_symbol`].
//!
//! ```rust
//! use imgpack_core::{Direction, Plane, filter};
//!
//! let plane = Plane::from_rows(&[[7u8, 7, 7]]).unwrap();
//! let residuals = filter::encode(&plane, Direction::Horizontal);
//! assert_eq!(residuals.residuals(), &[7, 0, 0]);
//!
//! let restored = filter::decode(&residuals, Direction::Horizontal);
//! assert_eq!(restored, plane);
//! ```

use crate::error::{CoreError, Result};
use crate::plane::{Plane, ResidualPlane};

/// Offset added to a residual to make it a non-negative symbol.
pub const SYMBOL_BIAS: i16 = 255;

/// Largest valid symbol (`255 + 255`).
pub const MAX_SYMBOL: u16 = 510;

/// Axis along which the predictor looks for the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Predict from the sample to the left (row-wise).
    #[default]
    Horizontal,
    /// Predict from the sample above (column-wise).
    Vertical,
}

impl From<bool> for Direction {
    /// `true` selects [`Direction::Vertical`].
    fn from(vertical: bool) -> Self {
        if vertical {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

impl Direction {
    /// Whether this is the vertical direction.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Apply the delta filter to a plane.
pub fn encode(plane: &Plane, direction: Direction) -> ResidualPlane {
    let shape = plane.shape();
    let width = shape.width;
    let samples = plane.samples();

    let residuals: Vec<i16> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let current = i16::from(s);
            match direction {
                Direction::Horizontal if i % width != 0 => current - i16::from(samples[i - 1]),
                Direction::Vertical if i >= width => current - i16::from(samples[i - width]),
                _ => current,
            }
        })
        .collect();

    ResidualPlane::from_parts(shape, residuals)
}

/// Invert the delta filter with a running sum along the same axis.
///
/// The sum is narrowed to `u8` modulo 256, which is the exact inverse of the
/// subtraction in [`encode`]. `direction` must match the one used to encode.
pub fn decode(residuals: &ResidualPlane, direction: Direction) -> Plane {
    let shape = residuals.shape();
    let width = shape.width;
    let mut samples: Vec<u8> = Vec::with_capacity(shape.len());

    for (i, &r) in residuals.residuals().iter().enumerate() {
        // Truncation to the low byte is intended.
        let delta = r as u8;
        let value = match direction {
            Direction::Horizontal if i % width != 0 => samples[i - 1].wrapping_add(delta),
            Direction::Vertical if i >= width => samples[i - width].wrapping_add(delta),
            _ => delta,
        };
        samples.push(value);
    }

    Plane::from_parts(shape, samples)
}

/// Bias a residual into the symbol domain.
///
/// `index` is only used for error reporting.
#[inline]
pub fn to_symbol(residual: i16, index: usize) -> Result<u16> {
    if !(-SYMBOL_BIAS..=SYMBOL_BIAS).contains(&residual) {
        return Err(CoreError::invalid_symbol(i32::from(residual), index));
    }
    Ok((residual + SYMBOL_BIAS) as u16)
}

/// Remove the bias from a symbol.
#[inline]
pub fn from_symbol(symbol: u16, index: usize) -> Result<i16> {
    if symbol > MAX_SYMBOL {
        return Err(CoreError::invalid_symbol(i32::from(symbol), index));
    }
    Ok(symbol as i16 - SYMBOL_BIAS)
}

/// Flatten a residual plane into biased symbols.
pub fn to_symbols(residuals: &ResidualPlane) -> Result<Vec<u16>> {
    residuals
        .residuals()
        .iter()
        .enumerate()
        .map(|(i, &r)| to_symbol(r, i))
        .collect()
}

/// Rebuild a residual plane from biased symbols.
pub fn from_symbols(height: usize, width: usize, symbols: &[u16]) -> Result<ResidualPlane> {
    let residuals = symbols
        .iter()
        .enumerate()
        .map(|(i, &s)| from_symbol(s, i))
        .collect::<Result<Vec<i16>>>()?;
    ResidualPlane::from_residuals(height, width, residuals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gradient(height: usize, width: usize) -> Plane {
        let samples = (0..height * width)
            .map(|i| ((i / width) * 3 + (i % width) * 5) as u8)
            .collect();
        Plane::from_samples(height, width, samples).unwrap()
    }

    #[test]
    fn test_horizontal_row() {
        let plane = Plane::from_rows(&[[7u8, 7, 7]]).unwrap();
        let residuals = encode(&plane, Direction::Horizontal);
        let symbols = to_symbols(&residuals).unwrap();
        assert_eq!(symbols, vec![262, 255, 255]);

        let back = from_symbols(1, 3, &symbols).unwrap();
        assert_eq!(decode(&back, Direction::Horizontal), plane);
    }

    #[test]
    fn test_vertical_keeps_first_row() {
        let plane = Plane::from_rows(&[[10u8, 20], [15, 5], [15, 255]]).unwrap();
        let residuals = encode(&plane, Direction::Vertical);
        assert_eq!(residuals.residuals(), &[10, 20, 5, -15, 0, 250]);
        assert_eq!(decode(&residuals, Direction::Vertical), plane);
    }

    #[test]
    fn test_horizontal_keeps_first_column() {
        let plane = Plane::from_rows(&[[0u8, 255], [255, 0]]).unwrap();
        let residuals = encode(&plane, Direction::Horizontal);
        assert_eq!(residuals.residuals(), &[0, 255, 255, -255]);
    }

    #[test]
    fn test_extreme_residuals_fit_symbol_domain() {
        assert_eq!(to_symbol(-255, 0).unwrap(), 0);
        assert_eq!(to_symbol(255, 0).unwrap(), 510);
        assert!(matches!(
            to_symbol(256, 3),
            Err(CoreError::InvalidSymbol { value: 256, index: 3 })
        ));
        assert!(from_symbol(511, 0).is_err());
        assert_eq!(from_symbol(0, 0).unwrap(), -255);
    }

    #[test]
    fn test_direction_from_bool() {
        assert_eq!(Direction::from(true), Direction::Vertical);
        assert_eq!(Direction::from(false), Direction::Horizontal);
        assert!(!Direction::default().is_vertical());
    }

    #[test]
    fn test_single_sample_and_empty() {
        let one = Plane::filled(1, 1, 42);
        for dir in [Direction::Horizontal, Direction::Vertical] {
            let residuals = encode(&one, dir);
            assert_eq!(residuals.residuals(), &[42]);
            assert_eq!(decode(&residuals, dir), one);
        }

        let empty = Plane::filled(0, 0, 0);
        assert_eq!(decode(&encode(&empty, Direction::Vertical), Direction::Vertical), empty);
    }

    #[test]
    fn test_gradient_roundtrip_both_directions() {
        let plane = gradient(17, 23);
        for dir in [Direction::Horizontal, Direction::Vertical] {
            assert_eq!(decode(&encode(&plane, dir), dir), plane);
        }
    }

    proptest! {
        #[test]
        fn prop_filter_roundtrip(
            height in 1usize..12,
            width in 1usize..12,
            seed in proptest::collection::vec(any::<u8>(), 144),
            vertical in any::<bool>(),
        ) {
            let samples = seed[..height * width].to_vec();
            let plane = Plane::from_samples(height, width, samples).unwrap();
            let dir = Direction::from(vertical);

            let residuals = encode(&plane, dir);
            let symbols = to_symbols(&residuals).unwrap();
            prop_assert!(symbols.iter().all(|&s| s <= MAX_SYMBOL));

            let back = from_symbols(height, width, &symbols).unwrap();
            prop_assert_eq!(decode(&back, dir), plane);
        }
    }
}
