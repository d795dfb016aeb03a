#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use conform_fixed as fixed;

#[doc(inline)]
pub use conform_image as image;

#[doc(inline)]
pub use conform_warp as warp;
