//! Block downsampling and upsampling with nearest-neighbor sampling.
//!
//! Both directions share one kernel: each output pixel copies exactly one
//! source pixel, chosen by the pixel-center rule
//! `src = floor((2 * dst + 1) * src_len / (2 * dst_len))`. Nothing is ever
//! averaged, so a downsample followed by an upsample to the original size
//! yields hard-edged blocks.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{PixelateError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How many source pixels map to one block along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockFactor(u32);

impl BlockFactor {
    /// Factor 1: downsample and upsample are both the identity.
    pub const IDENTITY: BlockFactor = BlockFactor(1);

    pub fn new(factor: u32) -> Result<Self> {
        if factor == 0 {
            return Err(PixelateError::InvalidBlockFactor(factor));
        }
        Ok(Self(factor))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for BlockFactor {
    fn default() -> Self {
        BlockFactor(8)
    }
}

impl TryFrom<u32> for BlockFactor {
    type Error = PixelateError;

    fn try_from(factor: u32) -> Result<Self> {
        BlockFactor::new(factor)
    }
}

/// Downsampled dimensions for `factor`: `floor(len / factor)`, never below 1.
pub fn block_dimensions(width: u32, height: u32, factor: BlockFactor) -> (u32, u32) {
    ((width / factor.0).max(1), (height / factor.0).max(1))
}

/// Shrink `source` by `factor`, one sampled pixel per block.
///
/// An image smaller than the factor along an axis collapses to a single
/// block on that axis.
pub fn downsample(source: &PixelBuffer, factor: BlockFactor) -> PixelBuffer {
    let (width, height) = block_dimensions(source.width(), source.height(), factor);
    log::trace!(
        "downsample {}x{} by {} -> {}x{}",
        source.width(),
        source.height(),
        factor.0,
        width,
        height
    );
    // Never larger than the source, so the allocation is already known to fit.
    resample(source, PixelBuffer::zeroed(width, height))
}

/// Grow `source` to `target_width × target_height` without smoothing.
///
/// # Errors
///
/// `InvalidDimension` if the target is smaller than the source along
/// either axis, or too large to allocate.
pub fn upsample(source: &PixelBuffer, target_width: u32, target_height: u32) -> Result<PixelBuffer> {
    if target_width < source.width() || target_height < source.height() {
        return Err(PixelateError::InvalidDimension {
            width: target_width,
            height: target_height,
        });
    }
    log::trace!(
        "upsample {}x{} -> {}x{}",
        source.width(),
        source.height(),
        target_width,
        target_height
    );
    let output = PixelBuffer::try_zeroed(target_width, target_height)?;
    Ok(resample(source, output))
}

/// Nearest-neighbor resize to arbitrary non-zero dimensions.
pub fn resize_nearest(source: &PixelBuffer, dst_width: u32, dst_height: u32) -> Result<PixelBuffer> {
    let output = PixelBuffer::try_zeroed(dst_width, dst_height)?;
    Ok(resample(source, output))
}

/// Source coordinate sampled for destination coordinate `dst`.
#[inline(always)]
fn source_index(dst: u32, dst_len: u32, src_len: u32) -> usize {
    let s = ((2 * dst as u64 + 1) * src_len as u64) / (2 * dst_len as u64);
    s.min(src_len as u64 - 1) as usize
}

/// Fill `output` from `source`; the output's dimensions select the scale.
fn resample(source: &PixelBuffer, mut output: PixelBuffer) -> PixelBuffer {
    let (src_width, src_height) = source.dimensions();
    let (dst_width, dst_height) = output.dimensions();
    if (src_width, src_height) == (dst_width, dst_height) {
        output.as_raw_mut().copy_from_slice(source.as_raw());
        return output;
    }

    // Byte offset within a source row for every destination column.
    let x_offsets: Vec<usize> = (0..dst_width)
        .map(|x| source_index(x, dst_width, src_width) * CHANNELS)
        .collect();

    let src = source.as_raw();
    let src_stride = src_width as usize * CHANNELS;
    let dst_stride = dst_width as usize * CHANNELS;

    let fill_row = |(y, row): (usize, &mut [u8])| {
        let sy = source_index(y as u32, dst_height, src_height);
        let src_row = &src[sy * src_stride..(sy + 1) * src_stride];
        for (dst_px, &sx) in row.chunks_exact_mut(CHANNELS).zip(&x_offsets) {
            dst_px.copy_from_slice(&src_row[sx..sx + CHANNELS]);
        }
    };

    #[cfg(feature = "parallel")]
    output
        .as_raw_mut()
        .par_chunks_exact_mut(dst_stride)
        .enumerate()
        .for_each(fill_row);

    #[cfg(not(feature = "parallel"))]
    output
        .as_raw_mut()
        .chunks_exact_mut(dst_stride)
        .enumerate()
        .for_each(fill_row);

    output
}
