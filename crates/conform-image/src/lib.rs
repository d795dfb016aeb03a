#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// packed pixel representation and blending.
pub mod pixel;

/// non-owning views over caller-supplied pixel buffers.
pub mod buffer;

/// Error types for the image module.
pub mod error;

pub use crate::buffer::{ImageSize, PixelBuffer, PixelBufferMut};
pub use crate::error::ImageError;
pub use crate::pixel::Pixel;
