//! WebAssembly bindings for glyphgrid

use crate::{Converter, RenderConfig};
use image::DynamicImage;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmConverter {
    converter: Converter,
}

#[wasm_bindgen]
impl WasmConverter {
    /// Create a converter from a JSON-encoded render config.
    ///
    /// # Arguments
    /// * `config_json` - Same shape as a `--config` file; missing fields take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmConverter, JsValue> {
        let config: RenderConfig = if config_json.trim().is_empty() {
            RenderConfig::default()
        } else {
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let converter = Converter::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmConverter { converter })
    }

    /// Render RGBA pixel data (e.g. from a canvas) as text art.
    #[wasm_bindgen]
    pub fn render_rgba(&self, image_data: &[u8], width: u32, height: u32) -> Result<String, JsValue> {
        let img = image::RgbaImage::from_raw(width, height, image_data.to_vec())
            .ok_or_else(|| JsValue::from_str("Invalid image dimensions"))?;
        self.converter
            .convert(&DynamicImage::ImageRgba8(img))
            .map(|doc| doc.to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
