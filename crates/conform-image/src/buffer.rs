use std::fmt;

use crate::error::ImageError;

/// Image size in pixels.
///
/// # Examples
///
/// ```
/// use conform_image::ImageSize;
///
/// let size = ImageSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
}

impl ImageSize {
    /// Total number of pixels.
    pub const fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

fn check_layout(len: usize, size: ImageSize) -> Result<(), ImageError> {
    if size.width < 2 || size.height < 2 {
        return Err(ImageError::InvalidDimensions(size.width, size.height));
    }
    if len != size.num_pixels() {
        return Err(ImageError::InvalidBufferLength(len, size.num_pixels()));
    }
    Ok(())
}

/// A read-only view over a caller-supplied row-major `0xAARRGGBB` buffer.
///
/// The view never copies and never mutates; its lifetime is bound to the
/// buffer it wraps. Both dimensions must be at least 2 so a bilinear 2x2
/// neighborhood always exists.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u32],
    size: ImageSize,
}

impl<'a> PixelBuffer<'a> {
    /// Wraps a pixel buffer, validating its layout.
    pub fn new(data: &'a [u32], size: ImageSize) -> Result<Self, ImageError> {
        check_layout(data.len(), size)?;
        Ok(Self { data, size })
    }

    /// The image size.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The underlying pixel words.
    pub fn as_slice(&self) -> &'a [u32] {
        self.data
    }

    /// The packed pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.size.width && y < self.size.height);
        self.data[y * self.size.width + x]
    }
}

/// A mutable view over a caller-supplied row-major `0xAARRGGBB` buffer.
///
/// Same layout contract as [`PixelBuffer`]; used as the destination of the
/// pullback renderer. The view does not pre-zero the buffer: pixel writes
/// OR-accumulate (see [`Pixel::write`](crate::Pixel::write)).
#[derive(Debug)]
pub struct PixelBufferMut<'a> {
    data: &'a mut [u32],
    size: ImageSize,
}

impl<'a> PixelBufferMut<'a> {
    /// Wraps a mutable pixel buffer, validating its layout.
    pub fn new(data: &'a mut [u32], size: ImageSize) -> Result<Self, ImageError> {
        check_layout(data.len(), size)?;
        Ok(Self { data, size })
    }

    /// The image size.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The underlying pixel words.
    pub fn as_slice_mut(&mut self) -> &mut [u32] {
        self.data
    }
}
