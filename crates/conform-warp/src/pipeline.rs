use thiserror::Error;

use conform_fixed::{Complex, Fixed};
use conform_image::{ImageError, ImageSize, PixelBuffer, PixelBufferMut};

use crate::blaschke::BlaschkeMap;
use crate::moebius::MobiusTransform;
use crate::render::{MappedBitmap, RenderError, RenderStrategy};
use crate::sampler::{BitmapSampler, BoundaryPolicy};

/// An error from the end-to-end warp entry point.
#[derive(Error, Debug)]
pub enum WarpError {
    /// A pixel buffer failed validation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The renderer could not be dispatched.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Parameters describing one warp invocation.
///
/// `pivot` and the factor parameters are given in the `[0,1]x[0,1]i` plane
/// coordinates the sampler uses; the pipeline carries them onto the
/// `[-1,1]` disk domain internally. Factor parameters beyond
/// [`MAX_FACTORS`](crate::MAX_FACTORS) are dropped by the product's capacity
/// rule.
#[derive(Debug, Clone)]
pub struct WarpParams {
    /// Fixed point of the pan/zoom transform, in plane coordinates.
    pub pivot: Complex,
    /// Zoom factor; a degenerate zero scale falls back to no zoom.
    pub scale: Fixed,
    /// Boundary treatment for out-of-range sample coordinates.
    pub policy: BoundaryPolicy,
    /// One hyperbolic-isometry factor is built per parameter, in order.
    pub factors: Vec<Complex>,
    /// Row dispatch strategy for the renderer.
    pub strategy: RenderStrategy,
}

impl Default for WarpParams {
    fn default() -> WarpParams {
        WarpParams {
            pivot: Complex::ZERO,
            scale: Fixed::ONE,
            policy: BoundaryPolicy::default(),
            factors: Vec::new(),
            strategy: RenderStrategy::default(),
        }
    }
}

/// Carries the sampler's `[0,1]` square onto the `[-1,1]` disk domain:
/// `V(z) = 2z - (1 + i)`.
const VIEW: MobiusTransform = MobiusTransform::new(
    Complex::new(Fixed::from_i32(2), Fixed::ZERO),
    Complex::new(Fixed::from_i32(-1), Fixed::from_i32(-1)),
    Complex::ZERO,
    Complex::ONE,
);

/// Builds the full plane map for the given parameters.
///
/// Every factor parameter `p` contributes the disk automorphism
/// `hyperbolic_isometry(V(p))`; the product is conjugated back into the
/// sampler's domain and pre-composed with the inverse pan/zoom:
/// `V⁻¹ | product | V | Z⁻¹`. With no factor parameters the product reduces
/// to a single identity factor, leaving pan/zoom as the only warp.
pub fn build_map(params: &WarpParams) -> BlaschkeMap {
    let zoom = MobiusTransform::new(
        Complex::new(params.scale, Fixed::ZERO),
        params.pivot,
        Complex::ZERO,
        Complex::ONE,
    );

    let mut product = if params.factors.is_empty() {
        BlaschkeMap::from_factor(MobiusTransform::IDENTITY)
    } else {
        BlaschkeMap::new()
    };
    for &param in &params.factors {
        product *= MobiusTransform::hyperbolic_isometry(VIEW.apply(param));
    }

    VIEW.invert() | product | VIEW | zoom.invert()
}

/// Rotates one factor parameter into a `degree`-fold symmetric family.
///
/// Successive parameters differ by the unit root `e^{2πi/degree}`. The
/// rotation factor is computed from floats once, here at construction time;
/// the per-pixel path remains pure fixed-point.
pub fn symmetric_parameters(param: Complex, degree: u32) -> Vec<Complex> {
    if degree == 0 {
        return Vec::new();
    }
    let angle = std::f32::consts::TAU / degree as f32;
    let zeta = Complex::from_f32(angle.cos(), angle.sin());

    let mut family = Vec::with_capacity(degree as usize);
    let mut p = param;
    for _ in 0..degree {
        family.push(p);
        p = p * zeta;
    }
    family
}

/// Warps `src` into `dst` through the map described by `params`.
///
/// Both buffers are row-major packed `0xAARRGGBB`. The destination is
/// OR-written: pre-zero it for a plain render, or leave prior contents to
/// accumulate bitwise. On success the destination is fully rendered before
/// this returns.
///
/// # Errors
///
/// Buffer validation failures and renderer dispatch failures are returned;
/// numeric edge cases inside the warp (poles, degenerate transforms) resolve
/// to defined fallback values and are never errors.
pub fn pullback_bitmaps(
    src_pixels: &[u32],
    src_size: ImageSize,
    dst_pixels: &mut [u32],
    dst_size: ImageSize,
    params: &WarpParams,
) -> Result<(), WarpError> {
    let src = PixelBuffer::new(src_pixels, src_size)?;
    let dst = PixelBufferMut::new(dst_pixels, dst_size)?;

    let sampler = BitmapSampler::new(src, params.policy);
    let map = build_map(params);

    MappedBitmap::new(dst).pullback(&map, &sampler, params.strategy)?;
    Ok(())
}
