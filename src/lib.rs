//! Pixelator Library
//!
//! Turns an image into blocky pixel art: downsample by an integer block
//! factor, optionally snap each block to the nearest color of a
//! user-supplied palette, then upsample back with hard edges.

pub mod buffer;
pub mod color;
pub mod error;
pub mod palette;
pub mod pixelate;
pub mod quantize;
pub mod resample;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export key types for easy usage
pub use buffer::PixelBuffer;
pub use color::{DistanceMetric, Oklab, Rgb};
pub use error::{PixelateError, Result};
pub use palette::Palette;
pub use pixelate::{pixelate, pixelate_with_config, PixelateConfig, PixelateResult};
pub use resample::{block_dimensions, downsample, resize_nearest, upsample, BlockFactor};

#[cfg(feature = "native")]
pub use pixelate::pixelate_image;

pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::color::{DistanceMetric, Rgb};
    pub use crate::error::{PixelateError, Result};
    pub use crate::palette::Palette;
    pub use crate::pixelate::{pixelate, pixelate_with_config, PixelateConfig, PixelateResult};
    pub use crate::quantize;
    pub use crate::resample::{downsample, upsample, BlockFactor};
}
