#![cfg(feature = "native")]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use pixelator::prelude::*;
use pixelator::pixelate_image;

fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([240, 30, 30, 255])
        } else {
            Rgba([20, 20, 200, 128])
        }
    })
}

#[test]
fn png_round_trip_through_pipeline() {
    let img = checkerboard(32, 8);
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();

    let decoded = image::load_from_memory(&png).unwrap();
    let source = PixelBuffer::try_from(&decoded).unwrap();
    let palette = Palette::parse(&["#ff0000", "#0000ff"]).unwrap();
    let config = PixelateConfig {
        block_factor: BlockFactor::new(8).unwrap(),
        palette,
        ..Default::default()
    };
    let result = pixelate_with_config(&source, &config).unwrap();

    assert_eq!(result.blocks_image().unwrap().dimensions(), (4, 4));
    let out = result.to_image().unwrap();
    assert_eq!(out.dimensions(), (32, 32));
    for (x, y, p) in out.enumerate_pixels() {
        let expected = if (x / 8 + y / 8) % 2 == 0 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 128])
        };
        assert_eq!(*p, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn pixelate_image_matches_buffer_pipeline() {
    let img = checkerboard(20, 3);
    let palette = Palette::parse(&["#888888", "#ff0000"]).unwrap();
    let factor = BlockFactor::new(5).unwrap();

    let via_image = pixelate_image(&img, factor, &palette).unwrap();
    let via_buffer = pixelate(&PixelBuffer::try_from(img).unwrap(), factor, &palette).unwrap();
    assert_eq!(via_image.into_raw(), via_buffer.into_raw());
}
