use conform_fixed::{Complex, Fixed};
use conform_image::{ImageSize, Pixel, PixelBuffer};

/// Treatment of sample coordinates outside the unit square.
///
/// A closed set of two policies, selected once at sampler construction and
/// branched on directly in the per-pixel path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Periodic wrap: out-of-range coordinates take their bit-pattern
    /// fraction, tiling the source across the plane.
    #[default]
    Tile,
    /// Saturate: out-of-range coordinates clamp to the nearest edge.
    Clamp,
}

/// A read-only sampler over a source pixel buffer.
///
/// Maps a point of the normalized plane domain `[0,1]x[0,1]i` to a bilinearly
/// interpolated [`Pixel`]. The plane coordinate is first rescaled by
/// per-axis aspect factors (`min(w,h)/w`, `min(w,h)/h`) so one plane unit
/// covers the same number of source pixels on both axes, then passed through
/// the boundary policy, then scaled into pixel-index space `[0, dim-1]`.
pub struct BitmapSampler<'a> {
    src: PixelBuffer<'a>,
    aspect_x: Fixed,
    aspect_y: Fixed,
    policy: BoundaryPolicy,
}

impl<'a> BitmapSampler<'a> {
    /// Creates a sampler over a validated source buffer.
    pub fn new(src: PixelBuffer<'a>, policy: BoundaryPolicy) -> BitmapSampler<'a> {
        let ImageSize { width, height } = src.size();
        let shorter = Fixed::from_i32(width.min(height) as i32);
        let aspect_x = shorter / Fixed::from_i32(width as i32);
        let aspect_y = shorter / Fixed::from_i32(height as i32);
        log::debug!("sampler created: size={}, policy={policy:?}", src.size());
        BitmapSampler {
            src,
            aspect_x,
            aspect_y,
            policy,
        }
    }

    /// The boundary policy in effect.
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    fn bound(&self, value: Fixed) -> Fixed {
        match self.policy {
            BoundaryPolicy::Tile => value.wrap_unit(),
            BoundaryPolicy::Clamp => value.clamp_unit(),
        }
    }

    fn neighbor(&self, index: usize, dim: usize) -> usize {
        match self.policy {
            BoundaryPolicy::Tile => (index + 1) % dim,
            BoundaryPolicy::Clamp => (index + 1).min(dim - 1),
        }
    }

    /// Samples the color at a plane point by bilinear interpolation.
    ///
    /// The four neighbors of the split coordinate are blended area-weighted:
    /// two interpolations along x, then one along y. Neighbor indices are
    /// wrapped or saturated per the boundary policy, so no coordinate can
    /// read outside the buffer.
    pub fn sample(&self, w: Complex) -> Pixel {
        let ImageSize { width, height } = self.src.size();

        let u = self.bound(w.re * self.aspect_x);
        let v = self.bound(w.im * self.aspect_y);

        let xfix = u * (width as i32 - 1);
        let yfix = v * (height as i32 - 1);
        let tx = xfix.frac();
        let ty = yfix.frac();

        let x0 = (xfix.to_index() as usize).min(width - 1);
        let y0 = (yfix.to_index() as usize).min(height - 1);
        let x1 = self.neighbor(x0, width);
        let y1 = self.neighbor(y0, height);

        let down = Pixel::lerp(
            Pixel::from_packed(self.src.get(x0, y0)),
            Pixel::from_packed(self.src.get(x1, y0)),
            tx,
        );
        let up = Pixel::lerp(
            Pixel::from_packed(self.src.get(x0, y1)),
            Pixel::from_packed(self.src.get(x1, y1)),
            tx,
        );
        Pixel::lerp(down, up, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_image::ImageError;

    const BLACK: u32 = 0xFF000000;
    const WHITE: u32 = 0xFFFFFFFF;
    const RED: u32 = 0xFFFF0000;
    const BLUE: u32 = 0xFF0000FF;

    fn square(data: &[u32]) -> PixelBuffer<'_> {
        let dim = (data.len() as f64).sqrt() as usize;
        PixelBuffer::new(
            data,
            ImageSize {
                width: dim,
                height: dim,
            },
        )
        .unwrap()
    }

    #[test]
    fn exact_pixel_coordinates_return_the_pixel_unchanged() {
        let data = [BLACK, WHITE, RED, BLUE];
        let sampler = BitmapSampler::new(square(&data), BoundaryPolicy::Tile);
        // a 2x2 image spans the unit square corner to corner
        assert_eq!(sampler.sample(Complex::from_f32(0.0, 0.0)).pack(), BLACK);
        assert_eq!(sampler.sample(Complex::from_f32(1.0, 0.0)).pack(), WHITE);
        assert_eq!(sampler.sample(Complex::from_f32(0.0, 1.0)).pack(), RED);
        assert_eq!(sampler.sample(Complex::from_f32(1.0, 1.0)).pack(), BLUE);
    }

    #[test]
    fn midpoint_blends_all_four_neighbors() {
        let data = [BLACK, WHITE, WHITE, BLACK];
        let sampler = BitmapSampler::new(square(&data), BoundaryPolicy::Tile);
        let mid = sampler.sample(Complex::from_f32(0.5, 0.5));
        // each color channel averages to mid-gray; alpha stays opaque
        assert_eq!(mid.alpha(), 0xFF);
        assert_eq!(mid.red(), 128);
        assert_eq!(mid.green(), 128);
        assert_eq!(mid.blue(), 128);
    }

    #[test]
    fn tile_policy_is_periodic() {
        let data = [BLACK, WHITE, RED, BLUE];
        let sampler = BitmapSampler::new(square(&data), BoundaryPolicy::Tile);
        for (re, im) in [(0.25, 0.25), (0.75, 0.5), (0.125, 0.875)] {
            let base = sampler.sample(Complex::from_f32(re, im));
            let shifted_x = sampler.sample(Complex::from_f32(re + 1.0, im));
            let shifted_y = sampler.sample(Complex::from_f32(re, im + 1.0));
            let negative = sampler.sample(Complex::from_f32(re - 1.0, im - 1.0));
            assert_eq!(base, shifted_x);
            assert_eq!(base, shifted_y);
            assert_eq!(base, negative);
        }
    }

    #[test]
    fn clamp_policy_saturates_to_the_nearest_boundary() {
        let data = [BLACK, WHITE, RED, BLUE];
        let sampler = BitmapSampler::new(square(&data), BoundaryPolicy::Clamp);
        assert_eq!(
            sampler.sample(Complex::from_f32(5.0, 0.0)),
            sampler.sample(Complex::from_f32(1.0, 0.0)),
        );
        assert_eq!(
            sampler.sample(Complex::from_f32(-3.0, -7.5)),
            sampler.sample(Complex::from_f32(0.0, 0.0)),
        );
        assert_eq!(
            sampler.sample(Complex::from_f32(2.0, 2.0)),
            sampler.sample(Complex::from_f32(1.0, 1.0)),
        );
    }

    #[test]
    fn top_boundary_under_tile_stays_in_bounds() {
        // sampling exactly at 1.0 must neither wrap to the first pixel nor
        // read past the last row/column
        let data = [BLACK, WHITE, RED, BLUE];
        let sampler = BitmapSampler::new(square(&data), BoundaryPolicy::Tile);
        assert_eq!(sampler.sample(Complex::from_f32(1.0, 1.0)).pack(), BLUE);
    }

    #[test]
    fn aspect_correction_squares_a_wide_image() -> Result<(), ImageError> {
        // 4x2 source: plane x is compressed by min/width = 1/2, so x = 1.0
        // lands on pixel column 1 (of 0..=3), not column 3
        let data = [
            BLACK, WHITE, RED, BLUE, //
            BLACK, WHITE, RED, BLUE,
        ];
        let buf = PixelBuffer::new(
            &data,
            ImageSize {
                width: 4,
                height: 2,
            },
        )?;
        let sampler = BitmapSampler::new(buf, BoundaryPolicy::Clamp);
        // x = 1.0 -> u = 0.5 -> pixel-space 0.5 * 3 = 1.5: between WHITE and RED
        let px = sampler.sample(Complex::from_f32(1.0, 0.0));
        assert_eq!(px.alpha(), 0xFF);
        assert_eq!(px.red(), 255);
        assert_eq!(px.green(), 128);
        assert_eq!(px.blue(), 128);
        Ok(())
    }
}
