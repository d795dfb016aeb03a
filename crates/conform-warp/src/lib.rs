#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// fractional-linear transformations of the complex plane.
pub mod moebius;

/// finite Blaschke-type products of disk automorphisms.
pub mod blaschke;

/// bilinear sampling of source bitmaps under a boundary policy.
pub mod sampler;

/// the pullback renderer and its execution strategies.
pub mod render;

/// parameter-driven construction of the full warp pipeline.
pub mod pipeline;

pub use crate::blaschke::{BlaschkeMap, MAX_FACTORS};
pub use crate::moebius::{ComplexMap, MobiusTransform};
pub use crate::pipeline::{pullback_bitmaps, symmetric_parameters, WarpError, WarpParams};
pub use crate::render::{MappedBitmap, RenderError, RenderStrategy};
pub use crate::sampler::{BitmapSampler, BoundaryPolicy};
