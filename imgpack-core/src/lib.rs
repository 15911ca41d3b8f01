//! # imgpack Core
//!
//! Core components shared by the imgpack image channel codecs.
//!
//! - [`plane`]: 2-D sample planes and signed residual planes
//! - [`filter`]: predictive delta filter and the biased symbol domain
//! - [`traits`]: the [`PlaneCodec`] trait implemented by whole-plane codecs
//! - [`error`]: error types
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌───────────────┐
//! │ Plane (u8)   │──▶│ filter::encode    │──▶│ to_symbols    │──▶ entropy coder
//! └──────────────┘   │ (delta, i16)      │   │ (+255, 0..510)│
//!                    └───────────────────┘   └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use imgpack_core::{Direction, Plane, filter};
//!
//! let plane = Plane::from_rows(&[[10u8, 12, 15], [10, 11, 11]]).unwrap();
//! let symbols = filter::to_symbols(&filter::encode(&plane, Direction::Vertical)).unwrap();
//! assert_eq!(symbols, vec![265, 267, 270, 255, 254, 251]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod plane;
pub mod traits;

pub use error::{CoreError, Result};
pub use filter::{Direction, MAX_SYMBOL, SYMBOL_BIAS};
pub use plane::{Plane, ResidualPlane, Shape};
pub use traits::PlaneCodec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::filter::Direction;
    pub use crate::plane::{Plane, ResidualPlane, Shape};
    pub use crate::traits::PlaneCodec;
}
