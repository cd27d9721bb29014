//! Owned RGBA8 pixel buffer.

use crate::error::{PixelateError, Result};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Maximum supported width or height.
pub const MAX_DIMENSION: u32 = 1 << 24;

/// A `width × height` grid of RGBA8 pixels stored row-major.
///
/// Width and height are always at least 1 and `data.len()` always equals
/// `width * height * 4`; every constructor checks this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self { width, height, data: vec![0; len] })
    }

    /// Create a buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = checked_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self { width, height, data })
    }

    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for a zero width or height, `InvalidDataLength` if
    /// `data` is not exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(PixelateError::InvalidDataLength { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// Build a buffer from a pixel function, row by row.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Ok(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Row-major RGBA pixel chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Zero-filled buffer no larger than one that already exists.
    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { width, height, data: vec![0; width as usize * height as usize * CHANNELS] }
    }

    /// Zero-filled buffer that reports a failed allocation instead of aborting.
    pub(crate) fn try_zeroed(width: u32, height: u32) -> Result<Self> {
        let len = checked_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| PixelateError::InvalidDimension { width, height })?;
        data.resize(len, 0);
        Ok(Self { width, height, data })
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Convert to `image::RgbaImage` (requires 'native' feature)
    #[cfg(feature = "native")]
    pub fn into_image(self) -> Result<image::RgbaImage> {
        let (width, height) = self.dimensions();
        let actual = self.data.len();
        image::RgbaImage::from_raw(width, height, self.data).ok_or(
            PixelateError::InvalidDataLength {
                expected: width as usize * height as usize * CHANNELS,
                actual,
            },
        )
    }

    #[cfg(feature = "native")]
    pub fn to_image(&self) -> Result<image::RgbaImage> {
        self.clone().into_image()
    }
}

#[cfg(feature = "native")]
impl TryFrom<image::RgbaImage> for PixelBuffer {
    type Error = PixelateError;

    fn try_from(img: image::RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        PixelBuffer::from_raw(width, height, img.into_raw())
    }
}

#[cfg(feature = "native")]
impl TryFrom<&image::DynamicImage> for PixelBuffer {
    type Error = PixelateError;

    fn try_from(img: &image::DynamicImage) -> Result<Self> {
        PixelBuffer::try_from(img.to_rgba8())
    }
}

/// Byte length of a `width × height` buffer.
///
/// Rejects zero, dimensions above `MAX_DIMENSION` and products that overflow
/// `usize` (which matters on 32-bit targets such as wasm32).
pub(crate) fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(PixelateError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(PixelateError::InvalidDimension { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            PixelBuffer::new(0, 5),
            Err(PixelateError::InvalidDimension { width: 0, height: 5 })
        );
        assert!(PixelBuffer::from_raw(3, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(err, PixelateError::InvalidDataLength { expected: 16, actual: 15 });
    }

    #[test]
    fn test_get_bounds() {
        let buf = PixelBuffer::filled(3, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(buf.get(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(buf.get(3, 0), None);
        assert_eq!(buf.get(0, 2), None);
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        assert_eq!(
            checked_len(u32::MAX, u32::MAX),
            Err(PixelateError::InvalidDimension { width: u32::MAX, height: u32::MAX })
        );
        assert!(checked_len(MAX_DIMENSION + 1, 1).is_err());
        assert_eq!(checked_len(MAX_DIMENSION, 1), Ok(MAX_DIMENSION as usize * CHANNELS));
    }

    #[test]
    fn test_try_zeroed_reports_failed_allocation() {
        // 2^50 bytes can never be reserved
        assert_eq!(
            PixelBuffer::try_zeroed(MAX_DIMENSION, MAX_DIMENSION),
            Err(PixelateError::InvalidDimension { width: MAX_DIMENSION, height: MAX_DIMENSION })
        );
        let buf = PixelBuffer::try_zeroed(2, 3).unwrap();
        assert_eq!(buf.as_raw(), &[0u8; 24]);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let buf = PixelBuffer::from_fn(2, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(buf.as_raw(), &[0, 0, 0, 255, 1, 0, 0, 255, 0, 1, 0, 255, 1, 1, 0, 255]);
        assert_eq!(buf.pixel_count(), 4);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_image_conversion() {
        let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([9, 8, 7, 6]));
        let buf = PixelBuffer::try_from(img.clone()).unwrap();
        assert_eq!(buf.dimensions(), (4, 3));
        assert_eq!(buf.into_image().unwrap(), img);
    }
}
