/// An error type for pixel-buffer validation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when image dimensions are below the 2x2 sampling minimum.
    #[error("image dimensions must be at least 2x2, got {0}x{1}")]
    InvalidDimensions(usize, usize),

    /// Error when the buffer length does not match the declared size.
    #[error("buffer length ({0}) does not match the image size ({1})")]
    InvalidBufferLength(usize, usize),
}
