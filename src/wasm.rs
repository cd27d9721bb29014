//! WebAssembly interface for the pixelator.

use crate::buffer::PixelBuffer;
use crate::color::{DistanceMetric, Rgb};
use crate::pixelate::{pixelate_with_config, PixelateConfig};
use crate::resample::BlockFactor;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct Pixelator {
    config: PixelateConfig,
}

#[wasm_bindgen]
impl Pixelator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: PixelateConfig::default(),
        }
    }

    pub fn block_factor(&self) -> u32 {
        self.config.block_factor.get()
    }

    pub fn set_block_factor(&mut self, factor: u32) -> Result<(), JsValue> {
        self.config.block_factor = BlockFactor::new(factor).map_err(js_err)?;
        Ok(())
    }

    /// 0 = RGB, 1 = Oklab
    pub fn set_metric(&mut self, metric: u8) {
        self.config.metric = match metric {
            1 => DistanceMetric::Oklab,
            _ => DistanceMetric::Rgb,
        };
    }

    pub fn add_color(&mut self, hex: &str) -> Result<(), JsValue> {
        let color: Rgb = hex.parse().map_err(js_err)?;
        self.config.palette.push(color);
        Ok(())
    }

    pub fn remove_color(&mut self, index: usize) -> bool {
        self.config.palette.remove(index).is_some()
    }

    pub fn clear_palette(&mut self) {
        self.config.palette.clear();
    }

    pub fn palette_hex(&self) -> Vec<String> {
        self.config.palette.to_hex_strings()
    }

    /// Pixelate RGBA bytes; returns RGBA bytes of the same dimensions.
    pub fn process(&self, image_data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
        let source = PixelBuffer::from_raw(width, height, image_data.to_vec()).map_err(js_err)?;
        let result = pixelate_with_config(&source, &self.config).map_err(js_err)?;
        Ok(result.into_output().into_raw())
    }

    /// Like `process`, but returns the small one-pixel-per-block image.
    pub fn process_blocks(&self, image_data: &[u8], width: u32, height: u32) -> Result<WasmBlocks, JsValue> {
        let source = PixelBuffer::from_raw(width, height, image_data.to_vec()).map_err(js_err)?;
        let result = pixelate_with_config(&source, &self.config).map_err(js_err)?;
        Ok(WasmBlocks::from(result.blocks))
    }
}

impl Default for Pixelator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct WasmBlocks {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

#[wasm_bindgen]
impl WasmBlocks {
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn get_rgba_data(&self) -> Vec<u8> {
        self.rgba_data.clone()
    }
}

impl From<PixelBuffer> for WasmBlocks {
    fn from(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            rgba_data: buffer.into_raw(),
        }
    }
}
