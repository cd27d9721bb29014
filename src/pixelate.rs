//! Pixelation pipeline: downsample, quantize, upsample.
//!
//! The quantizer sits between the two resampling passes so every output
//! block is matched against the palette exactly once.

use crate::buffer::PixelBuffer;
use crate::color::DistanceMetric;
use crate::error::Result;
use crate::palette::Palette;
use crate::quantize;
use crate::resample::{downsample, upsample, BlockFactor};

/// Pixelation configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelateConfig {
    /// Source pixels per block along each axis
    pub block_factor: BlockFactor,
    /// Output colors; empty keeps the sampled colors
    pub palette: Palette,
    /// Distance used for palette matching
    pub metric: DistanceMetric,
}

/// Result of a pixelation run
#[derive(Clone, Debug)]
pub struct PixelateResult {
    /// One pixel per block, after quantization
    pub blocks: PixelBuffer,
    /// Blocks scaled back to the source dimensions
    pub output: PixelBuffer,
}

impl PixelateResult {
    pub fn width(&self) -> u32 {
        self.output.width()
    }

    pub fn height(&self) -> u32 {
        self.output.height()
    }

    pub fn into_output(self) -> PixelBuffer {
        self.output
    }

    /// Raw RGBA bytes of the full-size output
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.output.as_raw().to_vec()
    }

    /// Convert to image::RgbaImage (requires 'native' feature)
    #[cfg(feature = "native")]
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        self.output.to_image()
    }

    /// The small block image, one pixel per block (requires 'native' feature)
    #[cfg(feature = "native")]
    pub fn blocks_image(&self) -> Result<image::RgbaImage> {
        self.blocks.to_image()
    }
}

/// Pixelate `source` with Euclidean RGB palette matching.
///
/// Deterministic, and never modifies `source`.
pub fn pixelate(source: &PixelBuffer, block_factor: BlockFactor, palette: &Palette) -> Result<PixelBuffer> {
    let config = PixelateConfig {
        block_factor,
        palette: palette.clone(),
        metric: DistanceMetric::Rgb,
    };
    Ok(pixelate_with_config(source, &config)?.into_output())
}

/// Full pipeline, keeping the intermediate block buffer.
pub fn pixelate_with_config(source: &PixelBuffer, config: &PixelateConfig) -> Result<PixelateResult> {
    log::debug!(
        "pixelating {}x{} with block factor {} and {} palette colors",
        source.width(),
        source.height(),
        config.block_factor.get(),
        config.palette.len()
    );

    let mut blocks = downsample(source, config.block_factor);
    quantize::apply_with_metric(&mut blocks, &config.palette, config.metric);
    let output = upsample(&blocks, source.width(), source.height())?;

    log::debug!("pixelated into {}x{} blocks", blocks.width(), blocks.height());

    Ok(PixelateResult { blocks, output })
}

/// Simple convenience function for common use case (requires 'native' feature)
#[cfg(feature = "native")]
pub fn pixelate_image(
    img: &image::RgbaImage,
    block_factor: BlockFactor,
    palette: &Palette,
) -> Result<image::RgbaImage> {
    let source = PixelBuffer::try_from(img.clone())?;
    pixelate(&source, block_factor, palette)?.into_image()
}
