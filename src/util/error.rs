//! Error types for pixelfind.

use thiserror::Error;

/// Result alias for pixelfind operations.
pub type PixelFindResult<T> = std::result::Result<T, PixelFindError>;

/// Errors that can occur while building images or running a search.
///
/// A needle that does not fit inside the haystack is not an error; the
/// search simply reports no match.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PixelFindError {
    /// Width or height is zero, or the buffer length disagrees with them.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride (in pixels) is smaller than the width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside the image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) is outside image {img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Threshold is NaN or outside `[0, 1]`.
    #[error("threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f64 },
    /// Decoding or encoding an image file failed.
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
    /// An assertion expected the needle to be present (or absent).
    #[error("assertion failed: {reason}")]
    NotFound { reason: String },
}
