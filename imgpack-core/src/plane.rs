//! Two-dimensional sample planes.
//!
//! A [`Plane`] is one image channel of unsigned 8-bit samples stored in
//! row-major order. A [`ResidualPlane`] holds the signed output of the
//! predictive filter with the same shape.

use crate::error::{CoreError, Result};

/// Height and width of a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Shape {
    /// Create a new shape.
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total number of samples (`height * width`).
    pub const fn len(&self) -> usize {
        self.height * self.width
    }

    /// Whether the shape holds no samples.
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    fn check(&self, actual: usize) -> Result<()> {
        if self.height.checked_mul(self.width) != Some(actual) {
            return Err(CoreError::shape_mismatch(self.height, self.width, actual));
        }
        Ok(())
    }
}

/// A 2-D array of unsigned 8-bit samples (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    shape: Shape,
    samples: Vec<u8>,
}

impl Plane {
    /// Build a plane from row-major samples.
    ///
    /// Fails with [`CoreError::ShapeMismatch`] when `samples.len()` is not
    /// `height * width`.
    pub fn from_samples(height: usize, width: usize, samples: Vec<u8>) -> Result<Self> {
        let shape = Shape::new(height, width);
        shape.check(samples.len())?;
        Ok(Self { shape, samples })
    }

    /// Build a plane from a slice of rows.
    ///
    /// The first row fixes the width. A row of any other length fails with
    /// [`CoreError::ShapeMismatch`] describing that single row.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut samples = Vec::with_capacity(height.saturating_mul(width));
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(CoreError::shape_mismatch(1, width, row.len()));
            }
            samples.extend_from_slice(row);
        }
        Ok(Self::from_parts(Shape::new(height, width), samples))
    }

    /// A plane filled with a single value.
    pub fn filled(height: usize, width: usize, value: u8) -> Self {
        Self {
            shape: Shape::new(height, width),
            samples: vec![value; height * width],
        }
    }

    /// Caller guarantees `samples.len() == shape.len()`.
    pub(crate) fn from_parts(shape: Shape, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), shape.len());
        Self { shape, samples }
    }

    /// Plane shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.shape.width
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.shape.height && col < self.shape.width {
            Some(self.samples[row * self.shape.width + col])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, so a zero-width plane yields no rows.
        self.samples.chunks(self.shape.width.max(1))
    }

    /// Consume the plane, returning its samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// Signed residuals produced by the predictive filter (row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualPlane {
    shape: Shape,
    residuals: Vec<i16>,
}

impl ResidualPlane {
    /// Build a residual plane from row-major residuals.
    pub fn from_residuals(height: usize, width: usize, residuals: Vec<i16>) -> Result<Self> {
        let shape = Shape::new(height, width);
        shape.check(residuals.len())?;
        Ok(Self { shape, residuals })
    }

    pub(crate) fn from_parts(shape: Shape, residuals: Vec<i16>) -> Self {
        debug_assert_eq!(residuals.len(), shape.len());
        Self { shape, residuals }
    }

    /// Plane shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Row-major residuals.
    pub fn residuals(&self) -> &[i16] {
        &self.residuals
    }

    /// Consume the plane, returning its residuals.
    pub fn into_residuals(self) -> Vec<i16> {
        self.residuals
    }
}
