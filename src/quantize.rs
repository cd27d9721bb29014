//! In-place palette quantization of a pixel buffer.
//!
//! Runs on the downsampled buffer, so the matching cost is paid once per
//! block rather than once per source pixel.

use crate::buffer::PixelBuffer;
use crate::color::{DistanceMetric, Rgb};
use crate::palette::Palette;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Replace every pixel's RGB with its nearest palette entry (Euclidean RGB).
///
/// An empty palette leaves the buffer untouched. Alpha is never modified.
pub fn apply(buffer: &mut PixelBuffer, palette: &Palette) {
    apply_with_metric(buffer, palette, DistanceMetric::Rgb);
}

/// Like [`apply`], with a choice of distance metric.
pub fn apply_with_metric(buffer: &mut PixelBuffer, palette: &Palette, metric: DistanceMetric) {
    if palette.is_empty() {
        return;
    }
    log::trace!(
        "quantizing {} pixels against {} colors ({:?})",
        buffer.pixel_count(),
        palette.len(),
        metric
    );

    let matcher = palette.matcher(metric);
    let colors = palette.colors();
    let remap = |px: &mut [u8]| {
        if let Some(idx) = matcher.nearest(Rgb::from_rgba_slice(px)) {
            let c = colors[idx];
            px[0] = c.r;
            px[1] = c.g;
            px[2] = c.b;
        }
    };

    #[cfg(feature = "parallel")]
    buffer.as_raw_mut().par_chunks_exact_mut(crate::buffer::CHANNELS).for_each(remap);

    #[cfg(not(feature = "parallel"))]
    buffer.pixels_mut().for_each(remap);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_is_noop() {
        let mut buf = PixelBuffer::from_fn(4, 3, |x, y| [x as u8 * 60, y as u8 * 80, 7, 200]).unwrap();
        let before = buf.clone();
        apply(&mut buf, &Palette::new());
        assert_eq!(buf, before);
    }

    #[test]
    fn test_primaries_to_black_and_white() {
        let palette = Palette::parse(&["#ffffff", "#000000"]).unwrap();
        let mut buf = PixelBuffer::from_raw(
            4,
            1,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 200, 200, 200, 255],
        )
        .unwrap();
        apply(&mut buf, &palette);
        assert_eq!(
            buf.as_raw(),
            &[0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn test_alpha_untouched() {
        let palette = Palette::from_colors(vec![Rgb::new(10, 10, 10)]);
        let mut buf = PixelBuffer::from_raw(2, 1, vec![1, 2, 3, 0, 250, 250, 250, 128]).unwrap();
        apply(&mut buf, &palette);
        assert_eq!(buf.as_raw(), &[10, 10, 10, 0, 10, 10, 10, 128]);
    }

    #[test]
    fn test_every_pixel_lands_in_palette() {
        let palette = Palette::parse(&["#1a1c2c", "#b13e53", "#ef7d57", "#ffcd75", "#a7f070"]).unwrap();
        for metric in [DistanceMetric::Rgb, DistanceMetric::Oklab] {
            let mut buf =
                PixelBuffer::from_fn(16, 16, |x, y| [x as u8 * 16, y as u8 * 16, 128, 255]).unwrap();
            apply_with_metric(&mut buf, &palette, metric);
            for px in buf.pixels() {
                assert!(palette.colors().contains(&Rgb::from_rgba_slice(px)));
            }
        }
    }
}
