use rayon::prelude::*;
use thiserror::Error;

use conform_fixed::{Complex, Fixed};
use conform_image::{ImageSize, PixelBufferMut};

use crate::moebius::ComplexMap;
use crate::sampler::BitmapSampler;

/// Errors that can occur while dispatching the renderer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The local thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPoolBuild(String),

    /// The requested worker count is invalid.
    #[error("worker count must be > 0, got {0}")]
    InvalidWorkerCount(usize),
}

/// Controls how destination rows are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    /// Partition rows across the global Rayon thread pool.
    #[default]
    Parallel,

    /// Render every row sequentially on the current thread.
    ///
    /// Useful for small destinations or when comparing against the parallel
    /// partition byte for byte.
    Serial,

    /// Render on a local thread pool with `n` workers.
    ///
    /// Builds a fresh pool on every call, which has real overhead; intended
    /// for benchmarking and isolation rather than steady-state use.
    Fixed(usize),
}

/// The pullback renderer: a destination view plus precomputed plane steps.
///
/// Destination pixel `(u, v)` is assigned the plane coordinate
/// `(u * step_u, v * step_v)` with `step = 1 / (dim - 1)`, so destination
/// pixels span the closed unit square and the corners evaluate the map at
/// exact plane corners. Within a row the abscissa accumulates the step
/// (fixed-point addition is exact, so this matches per-pixel multiplication);
/// each row's ordinate is one exact product, keeping rows independent of
/// render order.
pub struct MappedBitmap<'a> {
    dst: PixelBufferMut<'a>,
    step_u: Fixed,
    step_v: Fixed,
}

impl<'a> MappedBitmap<'a> {
    /// Creates a renderer over a validated destination buffer.
    pub fn new(dst: PixelBufferMut<'a>) -> MappedBitmap<'a> {
        let ImageSize { width, height } = dst.size();
        let step_u = Fixed::ONE / Fixed::from_i32(width as i32 - 1);
        let step_v = Fixed::ONE / Fixed::from_i32(height as i32 - 1);
        log::debug!("mapped bitmap created: size={}", dst.size());
        MappedBitmap {
            dst,
            step_u,
            step_v,
        }
    }

    /// Pulls the sampled source back through `map` into the destination.
    ///
    /// For every destination pixel the map is evaluated at the pixel's plane
    /// coordinate, the sampler is queried at the image point, and the packed
    /// color is OR-written into the destination word. Rows are partitioned
    /// into contiguous chunks per the strategy; every spawned chunk is joined
    /// before this returns, so the destination is fully rendered when the
    /// caller regains control.
    ///
    /// Each pixel is written exactly once from coordinates alone, so the
    /// output is byte-identical across strategies.
    pub fn pullback<M>(
        &mut self,
        map: &M,
        src: &BitmapSampler<'_>,
        strategy: RenderStrategy,
    ) -> Result<(), RenderError>
    where
        M: ComplexMap + Sync,
    {
        let width = self.dst.size().width;
        let (step_u, step_v) = (self.step_u, self.step_v);
        log::debug!("pullback dispatch: strategy={strategy:?}");

        let render_row = |(v, row): (usize, &mut [u32])| {
            let zv = step_v * v as i32;
            let mut zu = Fixed::ZERO;
            for dest in row.iter_mut() {
                src.sample(map.eval(Complex::new(zu, zv))).write(dest);
                zu += step_u;
            }
        };

        match strategy {
            RenderStrategy::Serial => {
                self.dst
                    .as_slice_mut()
                    .chunks_exact_mut(width)
                    .enumerate()
                    .for_each(render_row);
            }
            RenderStrategy::Parallel => {
                self.dst
                    .as_slice_mut()
                    .par_chunks_exact_mut(width)
                    .enumerate()
                    .for_each(render_row);
            }
            RenderStrategy::Fixed(workers) => {
                if workers == 0 {
                    return Err(RenderError::InvalidWorkerCount(workers));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| RenderError::ThreadPoolBuild(e.to_string()))?;

                pool.install(|| {
                    self.dst
                        .as_slice_mut()
                        .par_chunks_exact_mut(width)
                        .enumerate()
                        .for_each(render_row);
                });
            }
        }
        Ok(())
    }
}
