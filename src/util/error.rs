//! Error types for findimg.

use thiserror::Error;

/// Result alias for findimg operations.
pub type FindImgResult<T> = std::result::Result<T, FindImgError>;

/// Errors that can occur when building rasters or running a search.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FindImgError {
    /// A raster or view was requested with a zero or overflowing dimension.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer does not hold enough pixels.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// An owned pixel buffer is not exactly `width * height` long.
    #[error("buffer size mismatch: expected {expected}, got {got}")]
    BufferSizeMismatch { expected: usize, got: usize },
    /// A region of interest does not fit inside its image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) is out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Decoding or encoding an image file failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
