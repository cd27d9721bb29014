//! Error types for the pixelation pipeline.

use thiserror::Error;

/// Result type alias for pixelator operations.
pub type Result<T> = std::result::Result<T, PixelateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelateError {
    /// Zero width or height, a dimension too large to allocate, or an
    /// upsample target smaller than its source.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw pixel data length doesn't match `width * height * 4`.
    #[error("invalid pixel data length: expected {expected} bytes, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },

    /// Block factor of 0.
    #[error("block factor must be at least 1, got {0}")]
    InvalidBlockFactor(u32),

    /// A palette entry is not a valid RGB color. The whole palette is rejected.
    #[error("invalid palette entry {entry:?}: {reason}")]
    InvalidPalette { entry: String, reason: String },
}
