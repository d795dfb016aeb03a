#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// fixed-point scalar module.
pub mod fixed;

/// complex arithmetic over fixed-point scalars.
pub mod complex;

pub use crate::complex::Complex;
pub use crate::fixed::Fixed;
